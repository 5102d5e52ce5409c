use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use datafit_core::{
    CategoryCount, Cell, Column, ColumnKind, ColumnSummary, CorrelationMatrix, FlagDetails,
    FormatHints, MissingEntry, MissingTable, NumericStats, QualityDescriptor, Table, TableSummary,
    Thresholds, TopCategories,
};

use crate::model::TopCategoryOptions;

/// Computes per-column statistics and the missing table for a [`Table`].
#[derive(Debug, Clone)]
pub struct TableSummarizer<'a> {
    hints: &'a FormatHints,
}

impl<'a> TableSummarizer<'a> {
    pub fn new(hints: &'a FormatHints) -> Self {
        Self { hints }
    }

    pub fn summarize(&self, table: &Table) -> TableSummary {
        let n_rows = table.n_rows();
        let columns = table
            .columns()
            .iter()
            .map(|column| self.summarize_column(column, n_rows))
            .collect::<Vec<_>>();
        let missing = MissingTable::new(
            columns
                .iter()
                .map(|col| MissingEntry {
                    column: col.name.clone(),
                    missing_count: col.missing_count,
                    missing_share: col.missing_share,
                })
                .collect(),
        );

        TableSummary {
            n_rows: n_rows as u64,
            n_cols: table.n_cols() as u64,
            columns,
            missing,
        }
    }

    /// Most frequent values of the first `max_columns` categorical columns.
    ///
    /// Ties keep the order in which values first appear.
    pub fn top_categories(&self, table: &Table, options: &TopCategoryOptions) -> Vec<TopCategories> {
        let mut out = Vec::new();
        for column in table.columns() {
            if out.len() >= options.max_columns {
                break;
            }
            let values = self.present_values(column);
            if values.is_empty() || self.is_numeric(&values) {
                continue;
            }

            let mut order: Vec<Cow<'_, str>> = Vec::new();
            let mut counts: HashMap<Cow<'_, str>, u64> = HashMap::new();
            for value in &values {
                let key = category_key(value);
                match counts.get_mut(&key) {
                    Some(count) => *count += 1,
                    None => {
                        order.push(key.clone());
                        counts.insert(key, 1);
                    }
                }
            }

            let mut ranked = order
                .into_iter()
                .map(|value| {
                    let count = counts.get(&value).copied().unwrap_or_default();
                    CategoryCount {
                        value: value.into_owned(),
                        count,
                    }
                })
                .collect::<Vec<_>>();
            ranked.sort_by(|a, b| b.count.cmp(&a.count));
            ranked.truncate(options.top_k);

            out.push(TopCategories {
                column: column.name.clone(),
                values: ranked,
            });
        }
        out
    }

    /// Pearson correlation between every pair of numeric columns.
    pub fn correlations(&self, table: &Table) -> CorrelationMatrix {
        let numeric = table
            .columns()
            .iter()
            .filter_map(|column| self.numeric_cells(column).map(|cells| (&column.name, cells)))
            .collect::<Vec<_>>();

        let size = numeric.len();
        let mut values = vec![vec![None; size]; size];
        for i in 0..size {
            for j in i..size {
                let value = pearson(&numeric[i].1, &numeric[j].1);
                values[i][j] = value;
                values[j][i] = value;
            }
        }

        CorrelationMatrix {
            columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
            values,
        }
    }

    /// Row-aligned numbers of a numeric column, `None` for missing cells.
    fn numeric_cells(&self, column: &Column) -> Option<Vec<Option<f64>>> {
        let mut present = 0usize;
        let cells = column
            .cells
            .iter()
            .map(|cell| {
                if self.is_missing(cell) {
                    return Some(None);
                }
                present += 1;
                self.number(cell).map(Some)
            })
            .collect::<Option<Vec<_>>>()?;
        (present > 0).then_some(cells)
    }

    fn summarize_column(&self, column: &Column, n_rows: usize) -> ColumnSummary {
        let values = self.present_values(column);
        let missing_count = (column.cells.len() - values.len()) as u64;
        let missing_share = if n_rows == 0 {
            0.0
        } else {
            missing_count as f64 / n_rows as f64
        };

        let numbers = if values.is_empty() {
            None
        } else {
            values
                .iter()
                .map(|cell| self.number(cell))
                .collect::<Option<Vec<_>>>()
        };

        let (kind, distinct_count) = match numbers {
            Some(numbers) => {
                let distinct = numbers
                    .iter()
                    .map(|value| normalize_zero(*value).to_bits())
                    .collect::<HashSet<_>>()
                    .len();
                (
                    ColumnKind::Numeric {
                        stats: numeric_stats(&numbers),
                    },
                    distinct,
                )
            }
            None => {
                let distinct = values
                    .iter()
                    .map(|cell| category_key(cell))
                    .collect::<HashSet<_>>()
                    .len();
                (ColumnKind::Categorical, distinct)
            }
        };

        ColumnSummary {
            name: column.name.clone(),
            kind,
            missing_count,
            missing_share,
            distinct_count: distinct_count as u64,
        }
    }

    fn present_values<'c>(&self, column: &'c Column) -> Vec<&'c Cell> {
        column
            .cells
            .iter()
            .filter(|cell| !self.is_missing(cell))
            .collect()
    }

    fn is_missing(&self, cell: &Cell) -> bool {
        match cell {
            Cell::Missing => true,
            Cell::Number(value) => value.is_nan(),
            Cell::Text(text) => text.is_empty() || self.hints.is_null_marker(text),
        }
    }

    fn is_numeric(&self, values: &[&Cell]) -> bool {
        values.iter().all(|cell| self.number(cell).is_some())
    }

    fn number(&self, cell: &Cell) -> Option<f64> {
        match cell {
            Cell::Number(value) => value.is_finite().then_some(*value),
            Cell::Text(text) => self.hints.parse_number(text),
            Cell::Missing => None,
        }
    }
}

/// Table-derived descriptor plus the column names behind its booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDescriptor {
    pub descriptor: QualityDescriptor,
    pub details: FlagDetails,
}

/// Reduce a table summary to the descriptor consumed by flag evaluation.
pub fn derive_descriptor(summary: &TableSummary, thresholds: &Thresholds) -> DerivedDescriptor {
    let cardinality_limit = thresholds.cardinality_threshold * summary.n_rows as f64;

    let constant_columns = if summary.n_rows > 1 {
        summary
            .columns
            .iter()
            .filter(|col| col.distinct_count == 1)
            .map(|col| col.name.clone())
            .collect()
    } else {
        Vec::new()
    };

    let high_cardinality_columns = summary
        .columns
        .iter()
        .filter(|col| col.kind.is_categorical() && col.distinct_count as f64 > cardinality_limit)
        .map(|col| col.name.clone())
        .collect::<Vec<_>>();

    let max_missing_share = summary.missing.max_share();
    let descriptor = QualityDescriptor::new(
        saturating_i64(summary.n_rows),
        saturating_i64(summary.n_cols),
        max_missing_share,
    )
    .with_constant_columns(!constant_columns.is_empty())
    .with_high_cardinality_categoricals(!high_cardinality_columns.is_empty());

    DerivedDescriptor {
        descriptor,
        details: FlagDetails {
            constant_columns,
            high_cardinality_columns,
            max_missing_share,
            cardinality_limit,
        },
    }
}

fn numeric_stats(values: &[f64]) -> NumericStats {
    let count = values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / count;
    let std = if values.len() < 2 {
        0.0
    } else {
        let squared = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
        (squared / (count - 1.0)).sqrt()
    };
    NumericStats {
        min,
        max,
        mean,
        std,
    }
}

fn pearson(left: &[Option<f64>], right: &[Option<f64>]) -> Option<f64> {
    let pairs = left
        .iter()
        .zip(right)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect::<Vec<_>>();
    if pairs.len() < 2 {
        return None;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / count;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn category_key(cell: &Cell) -> Cow<'_, str> {
    match cell {
        Cell::Text(text) => Cow::Borrowed(text.as_str()),
        Cell::Number(value) => Cow::Owned(value.to_string()),
        Cell::Missing => Cow::Borrowed(""),
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
