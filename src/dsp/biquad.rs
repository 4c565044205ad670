//! Second-order Butterworth bandpass biquad
//!
//! Direct-form-II-transposed (z1, z2 state), coefficients from the bilinear
//! transform around a center frequency `f0 = sqrt(f_low * f_high)` and
//! bandwidth `bw = f_high - f_low`. Optional pre-filter ahead of the
//! Goertzel pair; the RTTY/PSK demodulators work without it, but a narrow
//! bandpass ahead of a busy passband reduces false starts from adjacent
//! traffic.

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

fn design(center_freq: f32, bandwidth: f32, sample_rate: f32) -> BiquadCoeffs {
    let omega = 2.0 * PI * center_freq / sample_rate;
    let q = center_freq / bandwidth;
    let alpha = omega.sin() / (2.0 * q);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * omega.cos();
    let a2 = 1.0 - alpha;

    BiquadCoeffs {
        b0: b0 / a0,
        b1: b1 / a0,
        b2: b2 / a0,
        a1: a1 / a0,
        a2: a2 / a0,
    }
}

/// A single second-order Butterworth bandpass section.
pub struct BandpassFilter {
    coeffs: BiquadCoeffs,
    center_freq: f32,
    bandwidth: f32,
    sample_rate: f32,
    z1: f32,
    z2: f32,
}

impl BandpassFilter {
    pub fn new(low_cutoff: f32, high_cutoff: f32, sample_rate: f32) -> Self {
        let center_freq = (low_cutoff * high_cutoff).sqrt();
        let bandwidth = high_cutoff - low_cutoff;
        Self {
            coeffs: design(center_freq, bandwidth, sample_rate),
            center_freq,
            bandwidth,
            sample_rate,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Direct-form-II-transposed single-sample step.
    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.coeffs.b0 * x + self.z1;
        self.z1 = self.coeffs.b1 * x - self.coeffs.a1 * y + self.z2;
        self.z2 = self.coeffs.b2 * x - self.coeffs.a2 * y;
        y
    }

    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process(*x);
        }
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    /// Closed-form magnitude response `|H(e^{j*omega})|` at frequency `f`, for
    /// design-time verification. Not used on the hot path.
    pub fn magnitude_response(&self, f: f32) -> f32 {
        let omega = 2.0 * PI * f / self.sample_rate;
        let c = &self.coeffs;

        // H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
        let (cos1, sin1) = (omega.cos(), omega.sin());
        let (cos2, sin2) = ((2.0 * omega).cos(), (2.0 * omega).sin());

        let num_re = c.b0 + c.b1 * cos1 + c.b2 * cos2;
        let num_im = -c.b1 * sin1 - c.b2 * sin2;
        let den_re = 1.0 + c.a1 * cos1 + c.a2 * cos2;
        let den_im = -c.a1 * sin1 - c.a2 * sin2;

        let num_mag = (num_re * num_re + num_im * num_im).sqrt();
        let den_mag = (den_re * den_re + den_im * den_im).sqrt();

        num_mag / den_mag
    }

    pub fn center_frequency(&self) -> f32 {
        self.center_freq
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }
}

/// N cascaded bandpass sections, each contributing ~40 dB/decade of
/// additional rolloff outside the passband.
pub struct CascadedBandpassFilter {
    sections: Vec<BandpassFilter>,
}

impl CascadedBandpassFilter {
    pub fn new(low_cutoff: f32, high_cutoff: f32, sample_rate: f32, num_sections: usize) -> Self {
        let sections = (0..num_sections.max(1))
            .map(|_| BandpassFilter::new(low_cutoff, high_cutoff, sample_rate))
            .collect();
        Self { sections }
    }

    pub fn process(&mut self, x: f32) -> f32 {
        self.sections.iter_mut().fold(x, |acc, s| s.process(acc))
    }

    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process(*x);
        }
    }

    pub fn reset(&mut self) {
        for s in &mut self.sections {
            s.reset();
        }
    }

    pub fn magnitude_response(&self, f: f32) -> f32 {
        self.sections
            .iter()
            .map(|s| s.magnitude_response(f))
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_center_frequency() {
        let filter = BandpassFilter::new(1955.0, 2295.0, 48_000.0);
        assert!(filter.magnitude_response(2125.0) >= 0.9);
    }

    #[test]
    fn rejects_far_above_high_cutoff() {
        let filter = BandpassFilter::new(1955.0, 2295.0, 48_000.0);
        assert!(filter.magnitude_response(2.0 * 2295.0) <= 0.1);
    }

    #[test]
    fn rejects_far_below_low_cutoff() {
        let filter = BandpassFilter::new(1955.0, 2295.0, 48_000.0);
        assert!(filter.magnitude_response(1955.0 * 0.5) <= 0.1);
    }

    #[test]
    fn reset_clears_filter_memory() {
        let mut filter = BandpassFilter::new(1955.0, 2295.0, 48_000.0);
        for _ in 0..200 {
            filter.process(1.0);
        }
        filter.reset();
        assert_eq!(filter.process(0.0), 0.0);
    }

    #[test]
    fn cascade_sharpens_rejection_beyond_single_section() {
        let single = BandpassFilter::new(1955.0, 2295.0, 48_000.0).magnitude_response(2900.0);
        let cascade = CascadedBandpassFilter::new(1955.0, 2295.0, 48_000.0, 3).magnitude_response(2900.0);
        assert!(cascade <= single);
    }
}
