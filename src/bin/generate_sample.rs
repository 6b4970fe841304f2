use anyhow::{Context, Result};
use serde::Serialize;

/// One line of the generated sales file.
#[derive(Debug, Serialize)]
struct SaleRow {
    date: String,
    city: &'static str,
    product: &'static str,
    sales: f64,
    units: u32,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index drawn with probability proportional to `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut pick = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if pick < *w {
                return i;
            }
            pick -= w;
        }
        weights.len() - 1
    }
}

/// `YYYY-MM-DD` for a zero-based day of 2024.
fn date_of(day: usize) -> String {
    const MONTH_DAYS: [usize; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut rest = day % 366;
    for (m, len) in MONTH_DAYS.iter().enumerate() {
        if rest < *len {
            return format!("2024-{:02}-{:02}", m + 1, rest + 1);
        }
        rest -= len;
    }
    unreachable!("day index wrapped to a valid day of the year")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let cities = ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Seattle", "Boston"];
    let city_weights = [0.25, 0.2, 0.15, 0.12, 0.1, 0.1, 0.08];
    let products = [("Widget", 19.5), ("Gadget", 42.0), ("Gizmo", 7.25)];

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let days = 180;
    let mut rows = 0;
    for day in 0..days {
        // Slow upward trend with weekly seasonality
        let base = 20.0 + day as f64 * 0.1 + 6.0 * (day as f64 * std::f64::consts::TAU / 7.0).sin();
        for _ in 0..3 {
            let city = cities[rng.weighted(&city_weights)];
            let (product, price) = products[(rng.next_u64() % products.len() as u64) as usize];
            let units = rng.gauss(base, 4.0).round().max(1.0) as u32;
            let sales = (units as f64 * price * 100.0).round() / 100.0;

            writer.serialize(SaleRow {
                date: date_of(day),
                city,
                product,
                sales,
                units,
            })?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} sales rows over {days} days to {output_path}");
    Ok(())
}
