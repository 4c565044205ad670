//! Spectral analysis utility (optional, not used by any modem)
//!
//! Not wired into RTTY or PSK decode — waterfall/spectrum display is
//! explicitly out of scope for the modem itself. Kept as a reusable,
//! rustfft-backed primitive for callers that want to show a caller's own
//! waterfall view of the incoming block alongside the decoded text.

use std::sync::Arc;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Computes windowed magnitude spectra from blocks of audio samples.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        let window: Vec<f32> = (0..fft_size)
            .map(|i| {
                let x = std::f32::consts::PI * i as f32 / fft_size as f32;
                0.5 * (1.0 - (2.0 * x).cos())
            })
            .collect();

        Self {
            fft,
            fft_size,
            window,
        }
    }

    /// Compute magnitude spectrum in dB over the positive frequencies.
    /// Input should have at least `fft_size` samples.
    pub fn compute(&mut self, samples: &[f32]) -> Vec<f32> {
        let fft = &self.fft;

        let mut buffer: Vec<Complex<f32>> = samples
            .iter()
            .take(self.fft_size)
            .zip(self.window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));
        fft.process(&mut buffer);

        let half_size = self.fft_size / 2;
        buffer[..half_size]
            .iter()
            .map(|c| 10.0 * c.norm_sqr().max(1e-10).log10())
            .collect()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}
