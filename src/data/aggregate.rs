//! Grouping of repeated trials and reduction to one MCC per parameter pair.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;

use super::error::DataError;
use super::model::{
    ExperimentTable, MetadataValue, ModelOrder, Row, DATASET_LEN_COLUMN, MALICIOUS_COLUMN,
    MCC_COLUMN, MODEL_COLUMN,
};
use crate::color::{ColorMap, Rgb};

// ---------------------------------------------------------------------------
// Aggregation statistic
// ---------------------------------------------------------------------------

/// Reduction applied to MCC values of trials sharing (model, malicious, dataset_len).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Aggregation {
    #[default]
    Min,
    Max,
    Mean,
    Median,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Mean => "mean",
            Aggregation::Median => "median",
        };
        f.write_str(s)
    }
}

impl Aggregation {
    /// Reduce a group of values. Returns `None` for an empty group.
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let reduced = match self {
            Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregation::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregation::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));

                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        };
        Some(reduced)
    }
}

// ---------------------------------------------------------------------------
// Presentation scaling
// ---------------------------------------------------------------------------

/// Divisors applied to the two experimental parameters before plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub malicious_divisor: f64,
    pub dataset_len_divisor: f64,
    /// Round scaled values to two decimals.
    pub round: bool,
}

impl Default for AxisScale {
    /// 20 participants and 60 000 training examples map to 1.0.
    fn default() -> Self {
        AxisScale {
            malicious_divisor: 20.0,
            dataset_len_divisor: 60000.0,
            round: true,
        }
    }
}

impl AxisScale {
    /// Plot raw counts.
    pub fn raw() -> Self {
        AxisScale {
            malicious_divisor: 1.0,
            dataset_len_divisor: 1.0,
            round: false,
        }
    }

    /// Whether both parameters are plotted as counts, whatever the rounding.
    pub fn is_raw(&self) -> bool {
        self.malicious_divisor == 1.0 && self.dataset_len_divisor == 1.0
    }

    fn apply(&self, value: f64, divisor: f64) -> f64 {
        let scaled = value / divisor;
        if self.round {
            (scaled * 100.0).round() / 100.0
        } else {
            scaled
        }
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Reduced points of one model, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub malicious: Vec<f64>,
    pub dataset_len: Vec<f64>,
    pub mcc: Vec<f64>,
    pub color: Rgb,
    pub visible: bool,
}

impl Series {
    pub fn len(&self) -> usize {
        self.mcc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mcc.is_empty()
    }

    /// Iterate over `(malicious, dataset_len, mcc)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.malicious
            .iter()
            .zip(&self.dataset_len)
            .zip(&self.mcc)
            .map(|((&x, &y), &z)| (x, y, z))
    }
}

/// Which models to plot and how to reduce and scale them.
#[derive(Debug, Clone, Default)]
pub struct SeriesOptions {
    pub aggregation: Aggregation,
    /// Explicit model list; `None` means every model in the table.
    pub models: Option<Vec<String>>,
    pub order: ModelOrder,
    pub scale: AxisScale,
}

impl SeriesOptions {
    /// The model names a figure built with these options will contain.
    pub fn selected_models(&self, table: &ExperimentTable) -> Vec<String> {
        match &self.models {
            Some(models) => models.clone(),
            None => table.models(self.order),
        }
    }
}

/// The (malicious, dataset_len) pair a group of trials shares.
#[derive(Debug, Clone, Copy)]
struct ParamKey {
    malicious: f64,
    dataset_len: f64,
}

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParamKey {}

impl PartialOrd for ParamKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParamKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.malicious
            .total_cmp(&other.malicious)
            .then(self.dataset_len.total_cmp(&other.dataset_len))
    }
}

fn numeric_cell(row: &Row, row_idx: usize, column: &'static str) -> Result<f64, DataError> {
    let cell = row.get(column).unwrap_or(&MetadataValue::Null);
    cell.as_f64()
        .filter(|v| !v.is_nan())
        // -0.0 and 0.0 must land in the same group
        .map(|v| v + 0.0)
        .ok_or_else(|| DataError::Conversion {
            row: row_idx,
            column,
            value: cell.to_string(),
        })
}

/// Group one model's rows by parameter pair and reduce each group.
///
/// Points come out ordered by ascending (malicious, dataset_len).
pub fn reduce_model(
    table: &ExperimentTable,
    model: &str,
    aggregation: Aggregation,
) -> Result<Vec<(f64, f64, f64)>, DataError> {
    let mut groups: BTreeMap<ParamKey, Vec<f64>> = BTreeMap::new();

    for (row_idx, row) in table.rows_for_model(model) {
        let key = ParamKey {
            malicious: numeric_cell(row, row_idx, MALICIOUS_COLUMN)?,
            dataset_len: numeric_cell(row, row_idx, DATASET_LEN_COLUMN)?,
        };
        let mcc = numeric_cell(row, row_idx, MCC_COLUMN)?;
        groups.entry(key).or_default().push(mcc);
    }

    Ok(groups
        .into_iter()
        .filter_map(|(key, values)| {
            aggregation
                .reduce(&values)
                .map(|mcc| (key.malicious, key.dataset_len, mcc))
        })
        .collect())
}

/// Build one [`Series`] per selected model.
///
/// A requested model that is absent from the table produces an empty series
/// and a warning rather than an error.
pub fn build_series(
    table: &ExperimentTable,
    options: &SeriesOptions,
) -> Result<Vec<Series>, DataError> {
    for column in [MODEL_COLUMN, MALICIOUS_COLUMN, DATASET_LEN_COLUMN, MCC_COLUMN] {
        if !table.has_column(column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let models = options.selected_models(table);
    let colors = ColorMap::new(&models);
    let scale = options.scale;

    let mut series = Vec::with_capacity(models.len());
    for model in &models {
        let points = reduce_model(table, model, options.aggregation)?;
        if points.is_empty() {
            log::warn!("Model '{model}' has no rows in the table; its series is empty");
        } else {
            log::info!(
                "{model}: {} points ({} of duplicate trials)",
                points.len(),
                options.aggregation
            );
        }

        series.push(Series {
            name: model.clone(),
            malicious: points
                .iter()
                .map(|p| scale.apply(p.0, scale.malicious_divisor))
                .collect(),
            dataset_len: points
                .iter()
                .map(|p| scale.apply(p.1, scale.dataset_len_divisor))
                .collect(),
            mcc: points.iter().map(|p| p.2).collect(),
            color: colors.color_for(model),
            visible: true,
        });
    }

    Ok(series)
}
