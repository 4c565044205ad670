//! Shared helpers for integration tests: a tiny deterministic PRNG for AWGN
//! and a Levenshtein-ratio accuracy metric, so noise/drift scenarios don't
//! need a new dependency for something this small.

/// xorshift64* — deterministic, seedable, good enough for test noise.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard-normal sample via Box-Muller.
    fn next_gaussian(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Add white Gaussian noise to `signal` so the result has the requested
/// SNR in dB, computed from the signal's own average power.
pub fn add_noise(signal: &[f32], snr_db: f64, seed: u64) -> Vec<f32> {
    let signal_power: f64 =
        signal.iter().map(|&s| (s as f64).powi(2)).sum::<f64>() / signal.len().max(1) as f64;
    let noise_power = signal_power / 10f64.powf(snr_db / 10.0);
    let noise_amplitude = noise_power.sqrt();

    let mut rng = Rng::new(seed);
    signal
        .iter()
        .map(|&s| (s as f64 + rng.next_gaussian() * noise_amplitude) as f32)
        .collect()
}

/// Levenshtein edit distance, classic O(nm) DP.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut prev_diag = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let temp = row[j];
            row[j] = if a[i - 1] == b[j - 1] {
                prev_diag
            } else {
                1 + row[j].min(row[j - 1]).min(prev_diag)
            };
            prev_diag = temp;
        }
    }
    row[b.len()]
}

/// Similarity ratio in `[0, 1]`: `1 - distance / max(len_a, len_b)`.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}
