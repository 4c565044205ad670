//! Raised-cosine symbol envelope shaping for PSK31/PSK63 TX
//!
//! PSK31 spectral compliance depends on this: an unshaped BPSK phase flip
//! is a step discontinuity and splatters across the band. Shaping the
//! amplitude down to (near) zero exactly at the moment of a phase flip
//! turns the discontinuity into a smooth, low-bandwidth transition.

use std::f32::consts::PI;

pub struct RaisedCosineShaper {
    samples_per_symbol: usize,
}

impl RaisedCosineShaper {
    pub fn new(samples_per_symbol: usize) -> Self {
        Self { samples_per_symbol }
    }

    /// Envelope multipliers (0.0 to 1.0) for one symbol period.
    ///
    /// `phase_change` symbols dip to (near) zero at the symbol midpoint —
    /// that's where the carrier phase must actually flip, so the flip lands
    /// where amplitude is lowest rather than at full amplitude.
    pub fn generate_envelope(&self, phase_change: bool) -> Vec<f32> {
        let n = self.samples_per_symbol;
        let mut envelope = vec![1.0; n];

        if phase_change {
            for (i, e) in envelope.iter_mut().enumerate() {
                let t = i as f32 / n as f32;
                *e = (PI * t).cos().abs();
            }
        }

        envelope
    }

    /// Sample index within the symbol where a `phase_change` envelope
    /// reaches its zero crossing — the correct moment to flip carrier phase.
    pub fn midpoint(&self) -> usize {
        self.samples_per_symbol / 2
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_phase_change_envelope_is_flat() {
        let shaper = RaisedCosineShaper::new(1536);
        let envelope = shaper.generate_envelope(false);

        assert_eq!(envelope.len(), 1536);
        assert!(envelope.iter().all(|&e| e == 1.0));
    }

    #[test]
    fn phase_change_envelope_dips_at_midpoint() {
        let shaper = RaisedCosineShaper::new(1536);
        let envelope = shaper.generate_envelope(true);

        assert_eq!(envelope.len(), 1536);
        assert!((envelope[0] - 1.0).abs() < 0.01);
        assert!(envelope[shaper.midpoint()] < 0.1);
    }
}
