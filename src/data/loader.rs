use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::{DataType, Schema};
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, CompanyDataset, CompanyRecord, Metric, COMPANY_NAME_COLUMN};
use crate::error::{Result, ScreenerError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a ticker sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one company per row
/// * `.json`    – `[{ "Company Name": "...", "ROIC": 12.5, ... }, ...]`
/// * `.parquet` – flat schema with a string `Company Name` column and
///   numeric metric columns
///
/// Every format must carry `Company Name` and the five metric columns.
pub fn load_file(path: &Path) -> Result<CompanyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(ScreenerError::UnsupportedFormat(other.to_string())),
    };

    let incomplete = dataset
        .records
        .iter()
        .filter(|r| !r.has_all_metrics())
        .count();
    if incomplete > 0 {
        log::warn!(
            "{incomplete} companies in {} have missing metric values",
            path.display()
        );
    }
    log::info!(
        "Loaded {} companies from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.column_names
    );
    Ok(dataset)
}

fn io_error(path: &Path, source: std::io::Error) -> ScreenerError {
    ScreenerError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Parse a textual metric cell. Empty and NaN cells are missing values.
fn parse_metric_cell(raw: &str, row: usize, metric: Metric) -> Result<Option<f64>> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ScreenerError::InvalidCell {
            row,
            column: metric.column().to_string(),
            value: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one company per row.
/// Columns other than the required ones are kept as extra cells.
fn load_csv(path: &Path) -> Result<CompanyDataset> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    read_csv(file)
}

pub(crate) fn read_csv<R: std::io::Read>(input: R) -> Result<CompanyDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ScreenerError::MissingColumn(name.to_string()))
    };
    let name_idx = position(COMPANY_NAME_COLUMN)?;
    let mut metric_idx = [0usize; 5];
    for metric in Metric::ALL {
        metric_idx[metric.index()] = position(metric.column())?;
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_no + 1;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();

        let mut metrics = [None; 5];
        for metric in Metric::ALL {
            let raw = record.get(metric_idx[metric.index()]).unwrap_or("");
            metrics[metric.index()] = parse_metric_cell(raw, row, metric)?;
        }

        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if col_idx == name_idx || metric_idx.contains(&col_idx) {
                continue;
            }
            if let Some(col_name) = headers.get(col_idx) {
                extra.insert(col_name.clone(), guess_cell_type(value.trim()));
            }
        }

        records.push(CompanyRecord {
            name,
            metrics,
            extra,
        });
    }

    Ok(CompanyDataset::new(records, headers))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Company Name": "Acme", "ROIC": 12.5, "EBIT Margin": 8.1, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<CompanyDataset> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<CompanyDataset> {
    let root: JsonValue = serde_json::from_str(text)?;

    let rows = root.as_array().ok_or_else(|| ScreenerError::MalformedRow {
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = rec.as_object().ok_or_else(|| ScreenerError::MalformedRow {
            row,
            message: "not a JSON object".to_string(),
        })?;

        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }

        let name = match obj.get(COMPANY_NAME_COLUMN) {
            Some(JsonValue::String(s)) => s.trim().to_string(),
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(JsonValue::Null) => String::new(),
            Some(other) => {
                return Err(ScreenerError::MalformedRow {
                    row,
                    message: format!("'{COMPANY_NAME_COLUMN}' is not text: {other}"),
                })
            }
            None => return Err(ScreenerError::MissingColumn(COMPANY_NAME_COLUMN.to_string())),
        };

        let mut metrics = [None; 5];
        for metric in Metric::ALL {
            let val = obj
                .get(metric.column())
                .ok_or_else(|| ScreenerError::MissingColumn(metric.column().to_string()))?;
            metrics[metric.index()] = json_metric(val, row, metric)?;
        }

        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            if key == COMPANY_NAME_COLUMN || Metric::from_column(key).is_some() {
                continue;
            }
            extra.insert(key.clone(), json_to_cell(val));
        }

        records.push(CompanyRecord {
            name,
            metrics,
            extra,
        });
    }

    if records.is_empty() {
        return Ok(CompanyDataset::from_records(records));
    }
    Ok(CompanyDataset::new(records, column_names))
}

fn json_metric(val: &JsonValue, row: usize, metric: Metric) -> Result<Option<f64>> {
    match val {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => Ok(n.as_f64().filter(|v| !v.is_nan())),
        JsonValue::String(s) => parse_metric_cell(s, row, metric),
        other => Err(ScreenerError::InvalidCell {
            row,
            column: metric.column().to_string(),
            value: other.to_string(),
        }),
    }
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one company per row.
///
/// Expected schema:
/// - `Company Name`: Utf8 or LargeUtf8
/// - the five metric columns: Int32, Int64, Float32 or Float64 (nulls allowed)
/// - any other columns are kept as extra cells
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<CompanyDataset> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let (name_idx, metric_idx) = check_parquet_schema(&schema)?;
    let column_names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

    let extra_cols: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx && !metric_idx.contains(i))
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let names = batch.column(name_idx);

        let mut metric_cols: Vec<Float64Array> = Vec::with_capacity(5);
        for metric in Metric::ALL {
            metric_cols.push(numeric_column(batch.column(metric_idx[metric.index()]), metric)?);
        }

        for row in 0..batch.num_rows() {
            let name = extract_string(names, row).unwrap_or_default();

            let mut metrics = [None; 5];
            for metric in Metric::ALL {
                let col = &metric_cols[metric.index()];
                metrics[metric.index()] = if col.is_null(row) || col.value(row).is_nan() {
                    None
                } else {
                    Some(col.value(row))
                };
            }

            let mut extra = BTreeMap::new();
            for (col_idx, col_name) in &extra_cols {
                extra.insert(col_name.clone(), extract_cell_value(batch.column(*col_idx), row));
            }

            records.push(CompanyRecord {
                name,
                metrics,
                extra,
            });
        }
    }

    Ok(CompanyDataset::new(records, column_names))
}

/// Locate the required columns and check their types against the file
/// schema, so a file without row groups is validated too.
fn check_parquet_schema(schema: &Schema) -> Result<(usize, [usize; 5])> {
    let index_of = |name: &str| {
        schema
            .index_of(name)
            .map_err(|_| ScreenerError::MissingColumn(name.to_string()))
    };

    let name_idx = index_of(COMPANY_NAME_COLUMN)?;
    match schema.field(name_idx).data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {}
        other => {
            return Err(ArrowError::SchemaError(format!(
                "column '{COMPANY_NAME_COLUMN}' has non-string type {other:?}"
            ))
            .into())
        }
    }

    let mut metric_idx = [0usize; 5];
    for metric in Metric::ALL {
        let idx = index_of(metric.column())?;
        check_numeric(schema.field(idx).data_type(), metric)?;
        metric_idx[metric.index()] = idx;
    }
    Ok((name_idx, metric_idx))
}

fn check_numeric(data_type: &DataType, metric: Metric) -> Result<()> {
    match data_type {
        DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64 => Ok(()),
        other => Err(ArrowError::SchemaError(format!(
            "column '{}' has non-numeric type {other:?}",
            metric.column()
        ))
        .into()),
    }
}

// -- Parquet / Arrow helpers --

/// Widen a numeric metric column to Float64.
fn numeric_column(col: &ArrayRef, metric: Metric) -> Result<Float64Array> {
    check_numeric(col.data_type(), metric)?;
    let widened = arrow::compute::cast(col, &DataType::Float64)?;
    widened
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| {
            ArrowError::CastError(format!("column '{}' did not cast to Float64", metric.column()))
                .into()
        })
}

fn extract_string(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return Some(String::new());
    }
    if let Some(s) = col.as_string_opt::<i32>() {
        return Some(s.value(row).trim().to_string());
    }
    col.as_string_opt::<i64>()
        .map(|s| s.value(row).trim().to_string())
}

/// Extract a single extra cell from an Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => extract_string(col, row)
            .map(CellValue::String)
            .unwrap_or(CellValue::Null),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64))
            .unwrap_or(CellValue::Null),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64))
            .unwrap_or(CellValue::Null),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row)))
            .unwrap_or(CellValue::Null),
        other => CellValue::String(format!("{other:?}")),
    }
}
