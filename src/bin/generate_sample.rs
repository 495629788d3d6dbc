use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use cytokine_viewer::data::loader::DEFAULT_DATA_PATH;
use cytokine_viewer::data::model::{Dataset, Entry, Metadata, Stage, StageStat};

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

/// Sample mean and (sample) standard deviation.
fn describe(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (name, control level in pg/mL, fold change per stage)
    let cytokines: [(&str, f64, f64); 12] = [
        ("IL-1β", 3.2, 1.25),
        ("IL-2", 2.1, 1.05),
        ("IL-4", 1.8, 0.95),
        ("IL-6", 5.0, 1.6),
        ("IL-8", 12.0, 1.4),
        ("IL-10", 4.5, 1.3),
        ("IL-12p70", 1.1, 1.0),
        ("IL-17A", 2.7, 1.2),
        ("IFN-γ", 6.3, 0.9),
        ("TNF-α", 7.4, 1.35),
        ("MCP-1", 95.0, 1.15),
        ("VEGF-A", 140.0, 1.5),
    ];

    let mut total_measurements = 0u64;
    let mut entries = Vec::with_capacity(cytokines.len());

    for (i, &(name, control_level, fold)) in cytokines.iter().enumerate() {
        let mut stages = BTreeMap::new();
        for (s, stage) in Stage::ALL.iter().enumerate() {
            // Leave a few holes so the viewer has "no data" cells to show.
            if (i + s) % 7 == 6 {
                continue;
            }
            let n = 3 + (rng.next_u64() % 18) as usize;
            let level = control_level * fold.powi(s as i32);
            let values: Vec<f64> = (0..n)
                .map(|_| rng.gauss(level, level * 0.25).max(0.0))
                .collect();
            let (mean, std_dev) = describe(&values);

            total_measurements += n as u64;
            stages.insert(
                stage.key().to_string(),
                StageStat {
                    sample_count: n as u64,
                    mean: Some(mean),
                    std_deviation: Some(std_dev),
                },
            );
        }
        entries.push(Entry {
            name: name.to_string(),
            stages,
        });
    }

    // One cytokine that was measured but never detected.
    entries.push(Entry {
        name: "IL-5".to_string(),
        stages: BTreeMap::new(),
    });

    let dataset = Dataset {
        entries,
        metadata: Metadata { total_measurements },
    };

    let output_path = Path::new(DEFAULT_DATA_PATH);
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(&dataset).context("serializing dataset")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} cytokines ({total_measurements} measurements) to {}",
        dataset.len(),
        output_path.display()
    );
    Ok(())
}
