use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use sheet_lens::config::AnalysisConfig;
use sheet_lens::data::filter::{filter_rows, FilterSpec, SortOrder};
use sheet_lens::data::loader::load_file;
use sheet_lens::engine::{classify, summarize};
use sheet_lens::report::profile_table;
use sheet_lens::service::{analyze, AnalysisType, AnalyzeResponse, FilterResponse};

#[derive(Parser)]
#[command(name = "sheet-lens")]
#[command(about = "Profile, correlate, trend and filter spreadsheet data")]
#[command(version)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an analysis over a .csv / .json / .parquet file
    Analyze {
        file: PathBuf,

        /// Analysis to run
        #[arg(long = "type", value_enum, default_value = "stats")]
        kind: KindArg,

        /// JSON file with reporting limits
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Filter and sort rows, printing the kept rows as JSON
    Filter {
        file: PathBuf,

        /// Case-insensitive substring matched against every cell
        #[arg(long)]
        search: Option<String>,

        /// Column for the single-column filter
        #[arg(long, requires = "value")]
        column: Option<String>,

        /// Case-insensitive substring required in --column
        #[arg(long, requires = "column")]
        value: Option<String>,

        /// Column to sort by
        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long, value_enum, default_value = "asc")]
        order: OrderArg,
    },
    /// Print a per-column profile table
    Profile { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Summary,
    Correlation,
    Trends,
    Outliers,
    Stats,
}

impl From<KindArg> for AnalysisType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Summary => AnalysisType::Summary,
            KindArg::Correlation => AnalysisType::Correlation,
            KindArg::Trends => AnalysisType::Trends,
            KindArg::Outliers => AnalysisType::Outliers,
            KindArg::Stats => AnalysisType::Stats,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing output")?;
    println!("{text}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_path(p),
        None => Ok(AnalysisConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, kind, config } => {
            let config = load_config(config.as_deref())?;
            let dataset = load_file(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            let response = AnalyzeResponse {
                success: true,
                analysis: analyze(&dataset, kind.into(), &config),
            };
            print_json(&response, cli.pretty)
        }
        Command::Filter {
            file,
            search,
            column,
            value,
            sort_by,
            order,
        } => {
            let dataset = load_file(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            let spec = FilterSpec {
                search,
                column,
                value,
                sort_by,
                sort_order: order.into(),
            };
            let data = filter_rows(&dataset, &spec)
                .into_iter()
                .map(|row| dataset.row_to_json(row))
                .collect();
            print_json(&FilterResponse { success: true, data }, cli.pretty)
        }
        Command::Profile { file } => {
            let dataset = load_file(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            let classification = classify(&dataset);
            let summary = summarize(&classification);
            println!("{}", profile_table(&classification, &summary)?);
            Ok(())
        }
    }
}
