use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{ExperimentTable, MetadataValue, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an experiment results table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (and anything unrecognised) – header row plus one result per line
/// * `.json` – `[{ "model": "LR", "malicious": 0, ... }, ...]`
/// * `.parquet` / `.pq` – flat scalar columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<ExperimentTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        _ => load_csv(path)?,
    };
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one result per record.
/// Every record must have as many fields as the header.
fn load_csv(path: &Path) -> Result<ExperimentTable, DataError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_csv(reader)
}

/// Parse CSV from any reader; split out so tests can feed in-memory text.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<ExperimentTable, DataError> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::Parse("missing header row".into()));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DataError::Parse(format!("CSV row {row_no}: {e}")))?;

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_metadata_type(value)))
            .collect();
        rows.push(row);
    }

    Ok(ExperimentTable::new(headers, rows))
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return MetadataValue::Float(f);
    }
    if s == "true" || s == "false" {
        return MetadataValue::Bool(s == "true");
    }
    MetadataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "model": "LR", "malicious": 0, "dataset_len": 60000, "mcc": 0.93 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ExperimentTable, DataError> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<ExperimentTable, DataError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::Parse("expected top-level JSON array".into()))?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::Parse(format!("row {i} is not a JSON object")))?;

        let mut row = Row::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            row.insert(key.clone(), json_to_metadata(val));
        }
        rows.push(row);
    }

    Ok(ExperimentTable::new(column_names, rows))
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of experiment results.
///
/// Every column is read as a scalar cell; works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ExperimentTable, DataError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        if column_names.is_empty() {
            column_names = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row_idx in 0..batch.num_rows() {
            let mut row = Row::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_metadata_value(batch.column(col_idx), row_idx)?;
                row.insert(field.name().clone(), value);
            }
            rows.push(row);
        }
    }

    Ok(ExperimentTable::new(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_metadata_value(col: &ArrayRef, row: usize) -> Result<MetadataValue, DataError> {
    if col.is_null(row) {
        return Ok(MetadataValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => MetadataValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => MetadataValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => MetadataValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => MetadataValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => MetadataValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => MetadataValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => MetadataValue::Bool(col.as_boolean().value(row)),
        // Dictionary-encoded strings, small ints, decimals, ... keep the text.
        _ => MetadataValue::String(array_value_to_string(col, row)?),
    };
    Ok(value)
}
