use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// MetadataValue – a single cell of the results table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
///
/// Loaders only guess the type; numeric coercion of the `malicious`,
/// `dataset_len` and `mcc` columns happens during aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    ///
    /// Strings are parsed as well, so a column that the loader kept as text
    /// (e.g. a Parquet string column of numbers) still converts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            MetadataValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Model name as written in the input: floats keep their decimal point.
    pub fn model_label(&self) -> String {
        match self {
            MetadataValue::Float(v) => format!("{v:?}"),
            other => other.to_string(),
        }
    }

    fn is_model(&self, name: &str) -> bool {
        match self {
            MetadataValue::String(s) => s == name,
            other => other.model_label() == name,
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one line of the results table
// ---------------------------------------------------------------------------

/// One experiment result: column name → cell.
pub type Row = BTreeMap<String, MetadataValue>;

/// Column holding the model name.
pub const MODEL_COLUMN: &str = "model";
/// Column holding the number of malicious participants.
pub const MALICIOUS_COLUMN: &str = "malicious";
/// Column holding the training-dataset size.
pub const DATASET_LEN_COLUMN: &str = "dataset_len";
/// Column holding the Matthews correlation coefficient.
pub const MCC_COLUMN: &str = "mcc";

/// Order of the default model list when none is requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelOrder {
    /// Order of first appearance in the table.
    #[default]
    FirstSeen,
    /// Lexicographic order of the model names.
    Sorted,
}

// ---------------------------------------------------------------------------
// ExperimentTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed results table.
#[derive(Debug, Clone, Default)]
pub struct ExperimentTable {
    /// All rows, in file order.
    pub rows: Vec<Row>,
    /// Column names in header order.
    pub column_names: Vec<String>,
}

impl ExperimentTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        ExperimentTable { rows, column_names }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Distinct values of the `model` column.
    pub fn models(&self, order: ModelOrder) -> Vec<String> {
        let names = self
            .rows
            .iter()
            .filter_map(|row| row.get(MODEL_COLUMN))
            .map(MetadataValue::model_label);

        match order {
            ModelOrder::FirstSeen => {
                let mut seen = HashSet::new();
                names.filter(|n| seen.insert(n.clone())).collect()
            }
            ModelOrder::Sorted => names.collect::<BTreeSet<_>>().into_iter().collect(),
        }
    }

    /// Rows (with their index in the table) whose model equals `model`.
    pub fn rows_for_model<'a>(
        &'a self,
        model: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Row)> + 'a {
        self.rows.iter().enumerate().filter(move |(_, row)| {
            row.get(MODEL_COLUMN).is_some_and(|v| v.is_model(model))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(model: &str) -> Row {
        let mut r = Row::new();
        r.insert(MODEL_COLUMN.into(), MetadataValue::String(model.into()));
        r
    }

    #[test]
    fn models_first_seen_keeps_file_order() {
        let table = ExperimentTable::new(
            vec![MODEL_COLUMN.into()],
            vec![row("SVM"), row("LR"), row("SVM"), row("DT")],
        );
        assert_eq!(table.models(ModelOrder::FirstSeen), vec!["SVM", "LR", "DT"]);
        assert_eq!(table.models(ModelOrder::Sorted), vec!["DT", "LR", "SVM"]);
    }

    #[test]
    fn as_f64_accepts_numeric_text() {
        assert_eq!(MetadataValue::String(" 0.5".into()).as_f64(), Some(0.5));
        assert_eq!(MetadataValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(MetadataValue::String("abc".into()).as_f64(), None);
        assert_eq!(MetadataValue::Null.as_f64(), None);
    }

    #[test]
    fn rows_for_model_returns_table_indices() {
        let table = ExperimentTable::new(
            vec![MODEL_COLUMN.into()],
            vec![row("A"), row("B"), row("A")],
        );
        let idx: Vec<usize> = table.rows_for_model("A").map(|(i, _)| i).collect();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn numeric_model_names_keep_their_written_form() {
        let mut float_model = Row::new();
        float_model.insert(MODEL_COLUMN.into(), MetadataValue::Float(1.0));
        let mut int_model = Row::new();
        int_model.insert(MODEL_COLUMN.into(), MetadataValue::Integer(2));
        let table = ExperimentTable::new(vec![MODEL_COLUMN.into()], vec![float_model, int_model]);

        assert_eq!(table.models(ModelOrder::FirstSeen), vec!["1.0", "2"]);
        assert_eq!(table.rows_for_model("1.0").count(), 1);
        assert_eq!(table.rows_for_model("1").count(), 0);
        assert_eq!(table.rows_for_model("2").count(), 1);
    }
}
