//! Phase-accumulator sine oscillator
//!
//! The single invariant that matters here: changing frequency must never
//! move the phase. Any FSK tone switch (mark ↔ space) goes through
//! `set_frequency`, and a discontinuous phase on a tone switch is audible
//! as a click and shows up as spectral splatter — the whole reason this is
//! a phase accumulator and not `sin(2*pi*f*t)` evaluated fresh each sample.

use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Phase-accumulator oscillator: `(phase, frequency, sample_rate)`.
pub struct SineGenerator {
    phase: f64,
    frequency: f64,
    sample_rate: f64,
}

impl SineGenerator {
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            frequency,
            sample_rate,
        }
    }

    /// Change frequency without touching phase (phase-continuity invariant).
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase.rem_euclid(TWO_PI);
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Adjust phase by a delta, used by PLL-style phase correction.
    pub fn adjust_phase(&mut self, delta: f64) {
        self.phase = (self.phase + delta).rem_euclid(TWO_PI);
    }

    /// `y = sin(phase)`, then advance `phase += 2*pi*f/Fs (mod 2*pi)`.
    pub fn next_sample(&mut self) -> f32 {
        let y = self.phase.sin() as f32;
        self.advance();
        y
    }

    /// Next (cos, sin) pair at the current phase — used for I/Q mixing.
    pub fn next_iq(&mut self) -> (f32, f32) {
        let i = self.phase.cos() as f32;
        let q = self.phase.sin() as f32;
        self.advance();
        (i, q)
    }

    pub fn generate(&mut self, n: usize) -> Vec<f32> {
        (0..n).map(|_| self.next_sample()).collect()
    }

    pub fn generate_duration(&mut self, seconds: f64) -> Vec<f32> {
        let n = (seconds * self.sample_rate).round().max(0.0) as usize;
        self.generate(n)
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn advance(&mut self) {
        self.phase = (self.phase + TWO_PI * self.frequency / self.sample_rate).rem_euclid(TWO_PI);
    }
}
