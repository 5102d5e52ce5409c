use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spread statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `0.0` with fewer than two values.
    pub std: f64,
}

/// Inferred column type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// At least one value, and every non-missing cell parsed as a number.
    Numeric { stats: NumericStats },
    /// Anything else, including columns without a single value.
    Categorical,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric { .. })
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Categorical)
    }
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
    pub missing_count: u64,
    pub missing_share: f64,
    /// Exact count of distinct non-missing values.
    pub distinct_count: u64,
}

/// Missing-cell count and share for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: u64,
    pub missing_share: f64,
}

/// Missing-cell counts keyed by column, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    pub fn new(entries: Vec<MissingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|entry| entry.column == column)
    }

    /// Largest missing share across columns; `0.0` for a table without columns.
    pub fn max_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.missing_share)
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-column summaries plus the missing table for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableSummary {
    pub n_rows: u64,
    pub n_cols: u64,
    pub columns: Vec<ColumnSummary>,
    pub missing: MissingTable,
}

impl TableSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|col| col.name == name)
    }
}

/// Frequency of one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCount {
    pub value: String,
    pub count: u64,
}

/// Most frequent values of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopCategories {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

/// Pairwise Pearson correlation between the numeric columns of a table.
///
/// `values[i][j]` pairs `columns[i]` with `columns[j]`, using only rows where
/// both cells are present. A pair is `None` when it has fewer than two such
/// rows or one side does not vary over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, left: &str, right: &str) -> Option<f64> {
        let i = self.columns.iter().position(|name| name == left)?;
        let j = self.columns.iter().position(|name| name == right)?;
        self.values.get(i)?.get(j).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(column: &str, missing_count: u64, missing_share: f64) -> MissingEntry {
        MissingEntry {
            column: column.to_string(),
            missing_count,
            missing_share,
        }
    }

    #[test]
    fn max_share_picks_largest_entry() {
        let table = MissingTable::new(vec![entry("a", 1, 0.25), entry("b", 2, 0.5)]);
        assert_eq!(table.max_share(), 0.5);
        assert_eq!(table.get("a").map(|e| e.missing_count), Some(1));
        assert!(table.get("c").is_none());
    }

    #[test]
    fn max_share_of_empty_table_is_zero() {
        assert_eq!(MissingTable::default().max_share(), 0.0);
    }

    #[test]
    fn correlation_lookup_by_name() {
        let matrix = CorrelationMatrix {
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![Some(1.0), Some(-0.5)], vec![Some(-0.5), None]],
        };
        assert_eq!(matrix.get("b", "a"), Some(-0.5));
        assert_eq!(matrix.get("b", "b"), None);
        assert_eq!(matrix.get("a", "c"), None);
        assert!(CorrelationMatrix::default().is_empty());
    }

    #[test]
    fn column_kind_serializes_as_tag() {
        let summary = ColumnSummary {
            name: "city".to_string(),
            kind: ColumnKind::Categorical,
            missing_count: 0,
            missing_share: 0.0,
            distinct_count: 2,
        };
        let value = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(value["kind"], "categorical");
        assert_eq!(value["distinct_count"], 2);
    }
}
