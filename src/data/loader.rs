use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::index::IndexedDataset;
use super::model::{RawRecord, YearField};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and index an indicator dataset.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "tara": "RO", "an": 2020, "indicator": "PIB", "valoare": 12000 }, ...]`
/// * `.csv`     – header row with `tara,an,indicator,valoare`
/// * `.parquet` – columns `tara`, `an`, `indicator`, `valoare`
///
/// Individual malformed rows are skipped; an unreadable file or a broken
/// top-level structure fails the whole load.
pub fn load_file(path: &Path) -> Result<IndexedDataset> {
    let records = read_records(path)?;
    let n_rows = records.len();
    let dataset = IndexedDataset::index(records);
    log::info!(
        "Indexed {} of {} rows from {}: {} countries, {} years",
        n_rows - dataset.rejected(),
        n_rows,
        path.display(),
        dataset.countries().count(),
        dataset.available_years().len()
    );
    Ok(dataset)
}

/// Read raw rows without validating them.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)
        }
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array.
///
/// Elements that are not objects or carry a wrongly typed field are dropped.
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => bail!("Expected top-level JSON array"),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(row) {
            Ok(rec) => records.push(rec),
            Err(e) => log::debug!("Row {i}: skipping malformed record: {e}"),
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming `tara`, `an`, `indicator`, `valoare` in any
/// order; extra columns are ignored. An empty `valoare` cell means no value.
/// Short rows leave the missing columns empty; unreadable rows are skipped.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let tara_idx = column("tara")?;
    let an_idx = column("an")?;
    let indicator_idx = column("indicator")?;
    let value_idx = column("valoare")?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("CSV row {row_no}: skipping unreadable record: {e}");
                continue;
            }
        };

        let text = |idx: usize| {
            record
                .get(idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let valoare = match text(value_idx) {
            Some(s) => match s.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::debug!("CSV row {row_no}: '{s}' is not a number");
                    None
                }
            },
            None => None,
        };

        records.push(RawRecord {
            tara: text(tara_idx),
            an: text(an_idx).map(YearField::Text),
            indicator: text(indicator_idx),
            valoare,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per (country, year, indicator).
///
/// Expected schema:
/// - `tara`, `indicator`: Utf8 or LargeUtf8
/// - `an`: Int32, Int64, Float64 or Utf8
/// - `valoare`: Float64, Float32, Int64 or Int32 (nullable)
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            Ok(batch.column(idx).clone())
        };
        let tara = column("tara")?;
        let an = column("an")?;
        let indicator = column("indicator")?;
        let valoare = column("valoare")?;

        for row in 0..batch.num_rows() {
            records.push(RawRecord {
                tara: string_cell(&tara, row),
                an: year_cell(&an, row),
                indicator: string_cell(&indicator, row),
                valoare: float_cell(&valoare, row),
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn string_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| a.value(row).to_string()),
        _ => None,
    }
}

fn year_cell(col: &ArrayRef, row: usize) -> Option<YearField> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| YearField::Int(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| YearField::Int(a.value(row))),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| YearField::Float(a.value(row))),
        DataType::Utf8 | DataType::LargeUtf8 => string_cell(col, row).map(YearField::Text),
        _ => None,
    }
}

fn float_cell(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| a.value(row)),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Country, Indicator};

    #[test]
    fn parses_mixed_year_types() {
        let recs = parse_json(
            r#"[
                {"tara":"RO","an":2020,"indicator":"PIB","valoare":12000},
                {"tara":"RO","an":"2021","indicator":"SV","valoare":75.5},
                {"tara":"RO","an":2022,"indicator":"POP","valoare":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].an, Some(YearField::Int(2020)));
        assert_eq!(recs[1].an, Some(YearField::Text("2021".into())));
        assert_eq!(recs[2].valoare, None);
    }

    #[test]
    fn drops_malformed_elements() {
        let recs = parse_json(
            r#"[
                {"tara":"RO","an":2020,"indicator":"PIB","valoare":"lots"},
                42,
                {"tara":"RO","an":2020,"indicator":"PIB","valoare":1}
            ]"#,
        )
        .unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn rejects_non_array_root() {
        assert!(parse_json(r#"{"tara":"RO"}"#).is_err());
        assert!(parse_json("not json").is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = read_records(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn indexes_parsed_rows() {
        let recs = parse_json(
            r#"[{"tara":"RO","an":2020,"indicator":"PIB","valoare":12000},
                {"tara":"US","an":2020,"indicator":"PIB","valoare":60000}]"#,
        )
        .unwrap();
        let ds = IndexedDataset::index(recs);
        let ro = Country::parse("RO").unwrap();
        assert_eq!(ds.value(ro, 2020, Indicator::Gdp), Some(12000.0));
        assert_eq!(ds.rejected(), 1);
    }
}
