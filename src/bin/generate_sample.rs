use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One generated employee/sales record.
struct Record {
    id: i64,
    name: String,
    department: &'static str,
    age: Option<i64>,
    hired: NaiveDate,
    revenue: f64,
    units: i64,
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Record> {
    let first_names = ["Alice", "Bob", "Charlie", "Dana", "Eve", "Farid", "Grace", "Hiro"];
    let departments = ["HR", "Finance", "IT", "Sales", "Operations"];
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default();

    (0..n)
        .map(|i| {
            let name = format!("{} {}", rng.pick(&first_names), i + 1);
            let department = rng.pick(&departments);
            // Roughly 1 in 8 ages left blank.
            let age = (rng.next_f64() > 0.125).then(|| 22 + (rng.next_u64() % 40) as i64);
            // Revenue drifts upward over the file so the trend reads "increasing".
            let revenue = 4000.0 + 40.0 * i as f64 + 600.0 * (rng.next_f64() - 0.5);
            // One planted spike in units.
            let units = if i == n / 3 {
                950
            } else {
                40 + (rng.next_u64() % 20) as i64
            };
            Record {
                id: i as i64 + 1,
                name,
                department,
                age,
                hired: start + Duration::days(7 * i as i64),
                revenue: (revenue * 100.0).round() / 100.0,
                units,
            }
        })
        .collect()
}

fn write_parquet(records: &[Record], path: &str) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("department", DataType::Utf8, false),
        Field::new("age", DataType::Int64, true),
        Field::new("hired", DataType::Date32, false),
        Field::new("revenue", DataType::Float64, false),
        Field::new("units", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.id))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.name.as_str()))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.department))),
            Arc::new(records.iter().map(|r| r.age).collect::<Int64Array>()),
            Arc::new(Date32Array::from_iter_values(
                records
                    .iter()
                    .map(|r| (r.hired - epoch).num_days() as i32),
            )),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.revenue))),
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.units))),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(records: &[Record], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record(["id", "name", "department", "age", "hired", "revenue", "units"])?;
    for r in records {
        writer.write_record([
            r.id.to_string(),
            r.name.clone(),
            r.department.to_string(),
            r.age.map(|a| a.to_string()).unwrap_or_default(),
            r.hired.format("%Y-%m-%d").to_string(),
            r.revenue.to_string(),
            r.units.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng, 120);

    write_parquet(&records, "sample_data.parquet")?;
    write_csv(&records, "sample_data.csv")?;

    log::info!("generated {} records", records.len());
    println!(
        "Wrote {} records to sample_data.parquet and sample_data.csv",
        records.len()
    );
    Ok(())
}
