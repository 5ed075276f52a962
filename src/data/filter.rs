use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};

use super::model::{CellValue, Dataset, Row};

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One filter/sort request. Every stage is optional; an absent or empty
/// field leaves that stage out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring matched against every cell of a row.
    pub search: Option<String>,
    /// Column for the single-column filter (needs `value`).
    pub column: Option<String>,
    /// Case-insensitive substring required in `column`.
    pub value: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl FilterSpec {
    fn search_term(&self) -> Option<String> {
        non_empty(&self.search).map(str::to_lowercase)
    }

    fn column_filter(&self) -> Option<(&str, String)> {
        Some((non_empty(&self.column)?, non_empty(&self.value)?.to_lowercase()))
    }
}

// ---------------------------------------------------------------------------
// Matching and ordering
// ---------------------------------------------------------------------------

fn contains_folded(cell: &CellValue, needle: &str) -> bool {
    cell.to_string().to_lowercase().contains(needle)
}

/// String order for sorting: root-locale collation, so accents and case
/// are secondary to the base letters.
pub struct TextOrder {
    collator: Option<Collator>,
}

impl TextOrder {
    pub fn root() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("root collation unavailable, sorting case-folded text: {e}");
                None
            }
        };
        TextOrder { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(a, b),
            None => case_folded_compare(a, b),
        }
    }
}

/// Case-insensitive first, lowercase before uppercase on otherwise equal text.
fn case_folded_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Numbers compare numerically; anything else by string form.
pub fn compare_cells(order: &TextOrder, a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => order.compare(&a.to_string(), &b.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass the spec, in output order.
///
/// Stages run as search → column filter → sort. The sort is stable, so rows
/// with equal keys keep their relative order in both directions.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    let search = spec.search_term();
    let column_filter = spec.column_filter();

    let mut indices: Vec<usize> = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| match &search {
            Some(term) => row.values().any(|cell| contains_folded(cell, term)),
            None => true,
        })
        .filter(|(i, _)| match &column_filter {
            Some((column, value)) => contains_folded(dataset.cell(*i, column), value),
            None => true,
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(key) = non_empty(&spec.sort_by) {
        let order = TextOrder::root();
        indices.sort_by(|&a, &b| {
            let ord = compare_cells(&order, dataset.cell(a, key), dataset.cell(b, key));
            match spec.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    log::debug!(
        "filter kept {} of {} rows",
        indices.len(),
        dataset.len()
    );
    indices
}

/// Borrowed view of the rows passing the spec; the dataset is untouched.
pub fn filter_rows<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> Vec<&'a Row> {
    filtered_indices(dataset, spec)
        .into_iter()
        .map(|i| &dataset.rows[i])
        .collect()
}
