use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Builder, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Value as JsonValue, json};

use eurostat_dashboard::data::{Country, Indicator};

/// One generated input row.
struct Row {
    tara: String,
    an: JsonValue,
    indicator: String,
    valoare: Option<f64>,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Indicator trajectories for one country: a baseline per indicator and a
/// yearly growth rate.
fn country_rows(country: Country, years: &[i64], rng: &mut SimpleRng) -> Vec<Row> {
    let gdp0 = rng.uniform(6_000.0, 60_000.0);
    let life0 = rng.uniform(72.0, 81.0);
    let pop0 = rng.uniform(0.4e6, 80.0e6);
    let gdp_growth = rng.uniform(0.005, 0.04);
    let pop_growth = rng.uniform(-0.008, 0.008);

    let mut rows = Vec::new();
    for (i, &year) in years.iter().enumerate() {
        let t = i as f64;
        let values = [
            (Indicator::Gdp, (gdp0 * (1.0 + gdp_growth).powf(t)).round()),
            (
                Indicator::Life,
                ((life0 + 0.18 * t + rng.uniform(-0.3, 0.3)) * 10.0).round() / 10.0,
            ),
            (Indicator::Pop, (pop0 * (1.0 + pop_growth).powf(t)).round()),
        ];
        for (indicator, value) in values {
            // Roughly one value in forty is missing upstream.
            let valoare = (rng.next_f64() > 0.025).then_some(value);
            // Years alternate between numbers and strings, as in the real export.
            let an = if rng.next_f64() < 0.5 {
                json!(year)
            } else {
                json!(year.to_string())
            };
            rows.push(Row {
                tara: country.code().to_string(),
                an,
                indicator: indicator.code().to_string(),
                valoare,
            });
        }
    }
    rows
}

/// Rows the indexer is expected to drop.
fn noise_rows(years: &[i64]) -> Vec<Row> {
    let last = years.last().copied().unwrap_or(2023);
    vec![
        Row {
            tara: "US".into(),
            an: json!(last),
            indicator: "PIB".into(),
            valoare: Some(65_000.0),
        },
        Row {
            tara: "EU27_2020".into(),
            an: json!(last),
            indicator: "SV".into(),
            valoare: Some(80.1),
        },
        Row {
            tara: "RO".into(),
            an: json!("n/a"),
            indicator: "POP".into(),
            valoare: Some(19.0e6),
        },
        Row {
            tara: "RO".into(),
            an: json!(last),
            indicator: "CO2".into(),
            valoare: Some(3.9),
        },
    ]
}

fn write_json(rows: &[Row], path: &PathBuf) -> Result<()> {
    let values: Vec<JsonValue> = rows
        .iter()
        .map(|r| {
            json!({
                "tara": r.tara,
                "an": r.an,
                "indicator": r.indicator,
                "valoare": r.valoare,
            })
        })
        .collect();
    let text = serde_json::to_string_pretty(&values).context("serializing rows")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_parquet(rows: &[Row], path: &PathBuf) -> Result<()> {
    // Parquet columns are typed: string years are parsed, unparsable ones
    // become nulls in the integer column.
    let tara = StringArray::from_iter_values(rows.iter().map(|r| r.tara.as_str()));
    let an: Int64Array = rows
        .iter()
        .map(|r| match &r.an {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.parse::<i64>().ok(),
            _ => None,
        })
        .collect();
    let indicator = StringArray::from_iter_values(rows.iter().map(|r| r.indicator.as_str()));
    let mut valoare = Float64Builder::with_capacity(rows.len());
    for r in rows {
        valoare.append_option(r.valoare);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("tara", DataType::Utf8, false),
        Field::new("an", DataType::Int64, true),
        Field::new("indicator", DataType::Utf8, false),
        Field::new("valoare", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(tara),
        Arc::new(an),
        Arc::new(indicator),
        Arc::new(valoare.finish()),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Output file when no argument is given. Kept apart from the bundled
/// `media/eurostat.json` so a bare run never overwrites it.
const DEFAULT_OUTPUT: &str = "eurostat_sample.json";

fn output_path(arg: Option<String>) -> PathBuf {
    PathBuf::from(arg.unwrap_or_else(|| DEFAULT_OUTPUT.to_string()))
}

fn main() -> Result<()> {
    env_logger::init();

    let path = output_path(std::env::args().nth(1));

    let years: Vec<i64> = (2004..=2023).collect();
    let mut rng = SimpleRng::new(42);

    let mut rows: Vec<Row> = Country::all()
        .flat_map(|c| country_rows(c, &years, &mut rng))
        .collect();
    rows.extend(noise_rows(&years));

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => write_json(&rows, &path)?,
        "parquet" | "pq" => write_parquet(&rows, &path)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    println!("Generated {} rows → {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use eurostat_dashboard::config::DashboardConfig;

    use super::*;

    #[test]
    fn default_output_leaves_bundled_dataset_alone() {
        let path = output_path(None);
        assert_eq!(path, PathBuf::from("eurostat_sample.json"));
        assert_ne!(path, DashboardConfig::default().data_path);
        assert_eq!(output_path(Some("out.parquet".into())), PathBuf::from("out.parquet"));
    }
}
