use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::clean;
use super::error::{DatasetError, Result};
use super::model::{Cell, RawTable, SalesDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a sales table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, comma separated (the `vgsales.csv` layout)
/// * `.json`    – `[{ "Name": ..., "Platform": ..., ... }, ...]`
/// * `.parquet` – flat schema with string / numeric columns
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(open(path)?)?,
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_json(&text)?
        }
        "parquet" | "pq" => read_parquet(open(path)?)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Read {} rows with columns {:?} from {}",
        table.rows.len(),
        table.columns,
        path.display()
    );
    clean(&table)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Text markers that a dataframe CSV reader treats as "not available".
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV layout: header row with column names, one sales entry per line.
///
/// Cells keep their exact source text; only NA markers become nulls.
/// Numeric columns are parsed later, when cleaning needs them, so text
/// columns such as a game called `007` are never rewritten.
pub fn read_csv<R: Read>(source: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        // Short rows are padded with nulls so they drop during cleaning.
        let row: Vec<Cell> = (0..columns.len())
            .map(|i| record.get(i).map(csv_cell).unwrap_or(Cell::Null))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn csv_cell(s: &str) -> Cell {
    if NA_MARKERS.contains(&s) {
        Cell::Null
    } else {
        Cell::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Wii Sports", "Platform": "Wii", "Year": 2006,
///     "Genre": "Sports", "Global_Sales": 82.74 },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys over all records; a key absent from a
/// record reads as null.
pub fn read_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| DatasetError::Malformed("expected top-level JSON array".into()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut column_pos: HashMap<String, usize> = HashMap::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DatasetError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !column_pos.contains_key(key) {
                column_pos.insert(key.clone(), columns.len());
                columns.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<Cell>> = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            let mut row = vec![Cell::Null; columns.len()];
            for (key, val) in obj {
                row[column_pos[key]] = json_to_cell(val);
            }
            row
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Read a Parquet file into a raw table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Pandas writes `Year` as a nullable
/// float column, which truncates like any other float during cleaning.
pub fn read_parquet(file: std::fs::File) -> Result<RawTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => Cell::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Cell::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        other => Cell::Text(format!("{other:?}")),
    }
}
