use anyhow::{Context, Result};

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

/// Write a demo CSV with a categorical column, two correlated numeric
/// columns, a heavy-tailed column for box-plot outliers and some missing
/// cells, so every plot type has something to show.
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_data.csv";
    let mut writer =
        csv::Writer::from_path(output_path).context("creating sample CSV")?;

    writer.write_record(["batch", "temperature", "yield", "impurity"])?;

    let batches = ["Batch_A", "Batch_B", "Batch_C"];
    let n_rows = 200;

    for i in 0..n_rows {
        let batch = batches[i % batches.len()];
        let temperature = rng.gauss(72.0, 4.0);
        let yield_pct = 0.8 * temperature + rng.gauss(20.0, 2.5);

        // Occasional spikes and gaps exercise outlier fences and
        // missing-value handling.
        let impurity = if rng.next_f64() < 0.04 {
            String::new()
        } else if rng.next_f64() < 0.05 {
            format!("{:.3}", rng.gauss(9.0, 1.0))
        } else {
            format!("{:.3}", rng.gauss(1.2, 0.3))
        };

        writer.write_record([
            batch.to_string(),
            format!("{temperature:.2}"),
            format!("{yield_pct:.2}"),
            impurity,
        ])?;
    }

    writer.flush().context("writing sample CSV")?;
    println!("Wrote {n_rows} rows to {output_path}");
    Ok(())
}
