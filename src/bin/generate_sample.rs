//! Writes `sample_results.csv` and `sample_results.parquet`: synthetic
//! experiment results with repeated trials, for trying out `mcc-plot`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Debug, Serialize)]
struct ResultRow {
    model: String,
    malicious: i64,
    dataset_len: i64,
    mcc: f64,
}

/// Clean-data MCC and how fast it collapses as malicious users join.
const MODELS: [(&str, f64, f64); 5] = [
    ("LR", 0.88, 0.09),
    ("SVM", 0.91, 0.07),
    ("KNN(3)", 0.85, 0.05),
    ("DT", 0.80, 0.11),
    ("RF", 0.93, 0.04),
];

const TOTAL_USERS: i64 = 20;
const FULL_DATASET: i64 = 60000;
const TRIALS: usize = 3;

fn synthetic_mcc(base: f64, decay: f64, malicious: i64, dataset_len: i64, rng: &mut SimpleRng) -> f64 {
    let data_share = dataset_len as f64 / FULL_DATASET as f64;
    let poisoning = 1.0 / (1.0 + (-(malicious as f64 - 10.0 * (1.0 - decay)) * decay * 6.0).exp());
    let mcc = base * (0.6 + 0.4 * data_share) * (1.0 - poisoning) + rng.gauss(0.0, 0.02);
    mcc.clamp(-1.0, 1.0)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut rows = Vec::new();
    for &(model, base, decay) in &MODELS {
        for malicious in (0..=TOTAL_USERS).step_by(2) {
            for dataset_len in (12000..=FULL_DATASET).step_by(12000) {
                for _ in 0..TRIALS {
                    rows.push(ResultRow {
                        model: model.to_string(),
                        malicious,
                        dataset_len,
                        mcc: synthetic_mcc(base, decay, malicious, dataset_len, &mut rng),
                    });
                }
            }
        }
    }

    // CSV
    let csv_path = "sample_results.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    // Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("malicious", DataType::Int64, false),
        Field::new("dataset_len", DataType::Int64, false),
        Field::new("mcc", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.model.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.malicious).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.dataset_len).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.mcc).collect::<Vec<_>>())),
        ],
    )?;

    let parquet_path = "sample_results.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} results ({} models × {} trials per point) to {csv_path} and {parquet_path}",
        rows.len(),
        MODELS.len(),
        TRIALS
    );
    Ok(())
}
