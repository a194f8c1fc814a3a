use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

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

/// Write one sample set: a sample list and its read-count table.
fn write_sample_set(
    dataset_root: &Path,
    name: &str,
    n_samples: usize,
    mean_reads: f64,
    rng: &mut SimpleRng,
) -> Result<()> {
    let dir = dataset_root.join("sample_sets").join(name);
    fs::create_dir_all(dir.join("count")).with_context(|| format!("creating {}", dir.display()))?;

    let samples: Vec<String> = (1..=n_samples).map(|i| format!("{name}_S{i:03}")).collect();

    let mut list = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(dir.join("samples.tsv"))?;
    list.write_record(["df_sample"])?;
    for sample in &samples {
        list.write_record([sample])?;
    }
    list.flush()?;

    let mut counts = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(dir.join("count").join("reads_and_basepairs.tsv"))?;
    counts.write_record(["Sample", "Reads", "BasePairs"])?;
    for sample in &samples {
        // log-normal spread of library sizes, ~150 bp reads
        let reads = (mean_reads.ln() + rng.gauss(0.0, 0.4)).exp().round() as u64;
        let read_len = 150.0 + rng.gauss(0.0, 5.0);
        let base_pairs = (reads as f64 * read_len).round() as u64;
        counts.write_record([sample.clone(), reads.to_string(), base_pairs.to_string()])?;
    }
    counts.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo_data"));
    let mut rng = SimpleRng::new(42);

    let datasets: [(&str, &[(&str, usize, f64)]); 2] = [
        ("Dataset1", &[("gut", 24, 2.0e6), ("skin", 12, 8.0e5)]),
        ("Dataset2", &[("soil_2021", 40, 5.0e6), ("soil_2022", 36, 4.5e6)]),
    ];

    let mut catalog = Vec::new();
    for (dataset, sample_sets) in &datasets {
        let root = out_dir.join(dataset);
        for &(name, n, mean) in sample_sets.iter() {
            write_sample_set(&root, name, n, mean, &mut rng)?;
        }
        catalog.push(json!({ "df": dataset, "fs_prefix": out_dir }));
    }

    let catalog_path = out_dir.join("catalog.json");
    fs::write(&catalog_path, serde_json::to_string_pretty(&catalog)?)
        .with_context(|| format!("writing {}", catalog_path.display()))?;

    println!(
        "Wrote {} datasets to {}; run with --catalog {}",
        datasets.len(),
        out_dir.display(),
        catalog_path.display()
    );
    Ok(())
}
