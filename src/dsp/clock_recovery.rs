//! Symbol timing recovery (Mueller-Müller timing error detector)
//!
//! Resolves the open question of which online symbol-clock recovery
//! algorithm to use: a continuously tracked Mueller-Müller detector, rather
//! than the offline timing-offset sweep an equivalent batch decoder might
//! use. Driven by a scalar signal derived from the in-phase downconverted
//! arm; see `crate::modem::psk::demodulator` for how the complex symbol is
//! latched once a boundary is declared.

/// Symbol clock recovery using a Mueller-Müller timing error detector.
pub struct ClockRecovery {
    samples_per_symbol: f64,
    omega: f64,
    gain_omega: f64,
    gain_mu: f64,
    mu: f64,
    last_sample: f32,
    last_symbol: f32,
    sample_count: f64,
}

impl ClockRecovery {
    pub fn new(samples_per_symbol: f64) -> Self {
        Self {
            samples_per_symbol,
            omega: samples_per_symbol,
            gain_omega: 0.001,
            gain_mu: 0.01,
            mu: 0.5,
            last_sample: 0.0,
            last_symbol: 0.0,
            sample_count: 0.0,
        }
    }

    /// Feed the driving (in-phase) signal for one sample. Returns `true`
    /// when this sample lands on a symbol decision boundary.
    pub fn process(&mut self, driving: f32) -> bool {
        self.sample_count += 1.0;

        if self.sample_count >= self.omega {
            self.sample_count -= self.omega;

            let timing_error = self.last_symbol * driving - self.last_sample * driving;

            self.omega += self.gain_omega * timing_error as f64;
            self.mu += self.gain_mu * timing_error as f64;
            self.omega = self
                .omega
                .clamp(self.samples_per_symbol * 0.9, self.samples_per_symbol * 1.1);

            self.last_symbol = driving;
            self.last_sample = driving;
            true
        } else {
            self.last_sample = driving;
            false
        }
    }

    pub fn samples_per_symbol_estimate(&self) -> f64 {
        self.omega
    }

    pub fn reset(&mut self) {
        self.omega = self.samples_per_symbol;
        self.mu = 0.5;
        self.last_sample = 0.0;
        self.last_symbol = 0.0;
        self.sample_count = 0.0;
    }
}
