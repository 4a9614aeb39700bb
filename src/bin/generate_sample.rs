use chrono::{Duration, NaiveDate};

use sismo_viewer::data::normalize::{ColumnMap, NOT_COMPUTABLE_SENTINEL, TIMESTAMP_FORMAT};

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Exponential tail, so small events vastly outnumber large ones.
    fn magnitude(&mut self) -> f64 {
        let u = self.next_f64().max(1e-15);
        let m = 1.8 - u.ln() * 0.55;
        (m.min(8.2) * 10.0).round() / 10.0
    }
}

/// Reference towns: (name, state, latitude, longitude).
const TOWNS: [(&str, &str, f64, f64); 8] = [
    ("PINOTEPA NACIONAL", "OAX", 16.34, -98.05),
    ("SALINA CRUZ", "OAX", 16.17, -95.20),
    ("OMETEPEC", "GRO", 16.69, -98.41),
    ("ACAPULCO", "GRO", 16.85, -99.88),
    ("CIUDAD HIDALGO", "CHIS", 14.68, -92.15),
    ("COALCOMAN", "MICH", 18.78, -103.16),
    ("TECOMAN", "COL", 18.91, -103.87),
    ("GUERRERO NEGRO", "BC", 27.96, -114.05),
];

const DIRECTIONS: [&str; 8] = [
    "NORTE", "SUR", "ESTE", "OESTE", "NORESTE", "NOROESTE", "SURESTE", "SUROESTE",
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let columns = ColumnMap::default();
    let year_start = NaiveDate::from_ymd_opt(2022, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");

    let output_path = "sample_catalog.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            &columns.timestamp,
            &columns.magnitude,
            &columns.latitude,
            &columns.longitude,
            &columns.depth,
            &columns.location,
            &columns.status,
        ])
        .expect("Failed to write header");

    let n_events = 2000;
    let mut offsets: Vec<i64> = (0..n_events)
        .map(|_| (rng.next_f64() * 365.0 * 86_400.0) as i64)
        .collect();
    offsets.sort_unstable();

    let mut n_not_computable = 0;
    for offset in offsets {
        let timestamp = year_start + Duration::seconds(offset);
        let &(town, state, lat, lon) = rng.pick(&TOWNS);
        let direction = rng.pick(&DIRECTIONS);

        let magnitude = if rng.next_f64() < 0.03 {
            n_not_computable += 1;
            NOT_COMPUTABLE_SENTINEL.to_string()
        } else {
            format!("{:.1}", rng.magnitude())
        };

        writer
            .write_record([
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                magnitude,
                format!("{:.4}", lat + rng.range(-0.6, 0.6)),
                format!("{:.4}", lon + rng.range(-0.6, 0.6)),
                format!("{:.1}", rng.range(2.0, 90.0)),
                format!(
                    "{} km al {direction} de {town}, {state}",
                    rng.range(3.0, 120.0) as u32
                ),
                if rng.next_f64() < 0.9 { "revisado" } else { "verificado" }.to_string(),
            ])
            .expect("Failed to write event");
    }
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {n_events} events ({n_not_computable} without magnitude) to {output_path}"
    );
}
