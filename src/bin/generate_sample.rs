use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use stock_screener::Metric;

const SAMPLE_COMPANIES: usize = 40;

const SECTORS: [&str; 5] = ["Technology", "Industrials", "Healthcare", "Consumer", "Energy"];

const NAME_STEMS: [&str; 8] = [
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Vandelay", "Stark", "Wayne",
];
const NAME_SUFFIXES: [&str; 5] = ["Corp", "Holdings", "Industries", "Group", "Systems"];

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

    /// Uniform in `[lo, hi)`, rounded to one decimal like a broker export.
    fn metric(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 10.0).round() / 10.0
    }
}

/// Plausible range per metric, in percent.
fn metric_range(metric: Metric) -> (f64, f64) {
    match metric {
        Metric::Roic => (-5.0, 40.0),
        Metric::EbitMargin => (-10.0, 45.0),
        Metric::PriceLowRelative52W => (0.0, 120.0),
        Metric::RevenueGrowthRate => (-8.0, 30.0),
        Metric::EbitMarginImprovement => (-6.0, 8.0),
    }
}

struct SampleCompany {
    name: String,
    ticker: String,
    sector: &'static str,
    metrics: [f64; 5],
}

fn generate(count: usize, rng: &mut SimpleRng) -> Vec<SampleCompany> {
    (0..count)
        .map(|i| {
            let stem = NAME_STEMS[i % NAME_STEMS.len()];
            let suffix = NAME_SUFFIXES[(i / NAME_STEMS.len()) % NAME_SUFFIXES.len()];
            let ticker = format!("{}{i}", stem[..3].to_ascii_uppercase());
            let mut metrics = [0.0; 5];
            for m in Metric::ALL {
                let (lo, hi) = metric_range(m);
                metrics[m.index()] = rng.metric(lo, hi);
            }
            SampleCompany {
                name: format!("{stem} {suffix}"),
                ticker,
                sector: SECTORS[i % SECTORS.len()],
                metrics,
            }
        })
        .collect()
}

fn write_csv(path: &Path, companies: &[SampleCompany]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Company Name", "Ticker", "Sector"];
    header.extend(Metric::ALL.iter().map(|m| m.column()));
    writer.write_record(&header)?;

    for c in companies {
        let mut row = vec![c.name.clone(), c.ticker.clone(), c.sector.to_string()];
        row.extend(c.metrics.iter().map(|v| v.to_string()));
        writer.write_record(&row)?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, companies: &[SampleCompany]) -> Result<()> {
    let mut fields = vec![
        Field::new("Company Name", DataType::Utf8, false),
        Field::new("Ticker", DataType::Utf8, false),
        Field::new("Sector", DataType::Utf8, false),
    ];
    fields.extend(
        Metric::ALL
            .iter()
            .map(|m| Field::new(m.column(), DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(companies.iter().map(|c| c.name.as_str()))),
        Arc::new(StringArray::from_iter_values(companies.iter().map(|c| c.ticker.as_str()))),
        Arc::new(StringArray::from_iter_values(companies.iter().map(|c| c.sector))),
    ];
    for m in Metric::ALL {
        let values: Vec<f64> = companies.iter().map(|c| c.metrics[m.index()]).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rng = SimpleRng::new(42);
    let companies = generate(SAMPLE_COMPANIES, &mut rng);

    let csv_path = out_dir.join("Tickers.csv");
    let parquet_path = out_dir.join("Tickers.parquet");
    write_csv(&csv_path, &companies)?;
    write_parquet(&parquet_path, &companies)?;

    println!(
        "Wrote {} companies to {} and {}",
        companies.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_metrics_stay_in_range() {
        let mut rng = SimpleRng::new(7);
        for c in generate(SAMPLE_COMPANIES, &mut rng) {
            for m in Metric::ALL {
                let (lo, hi) = metric_range(m);
                let v = c.metrics[m.index()];
                assert!(v >= lo && v <= hi, "{} {m} = {v}", c.name);
            }
        }
    }

    #[test]
    fn written_sheets_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let companies = generate(12, &mut SimpleRng::new(42));

        let csv_path = dir.path().join("Tickers.csv");
        write_csv(&csv_path, &companies).unwrap();
        let from_csv = stock_screener::load_file(&csv_path).unwrap();

        let parquet_path = dir.path().join("Tickers.parquet");
        write_parquet(&parquet_path, &companies).unwrap();
        let from_parquet = stock_screener::load_file(&parquet_path).unwrap();

        assert_eq!(from_csv.len(), 12);
        assert_eq!(from_parquet.len(), 12);
        for (a, b) in from_csv.records.iter().zip(&from_parquet.records) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.metrics, b.metrics);
        }
    }
}
