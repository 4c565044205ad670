//! Goertzel single-bin power detector and FSK mark/space correlator

use std::f32::consts::PI;

/// Recursive single-frequency-bin power detector, O(N) time, O(1) state.
pub struct GoertzelFilter {
    coef: f32,
    s1: f32,
    s2: f32,
    block_size: usize,
    samples_seen: usize,
    target_freq: f32,
    sample_rate: f32,
}

impl GoertzelFilter {
    pub fn new(target_freq: f32, sample_rate: f32, block_size: usize) -> Self {
        let mut f = Self {
            coef: 0.0,
            s1: 0.0,
            s2: 0.0,
            block_size,
            samples_seen: 0,
            target_freq,
            sample_rate,
        };
        f.recompute_coef();
        f
    }

    fn recompute_coef(&mut self) {
        let k = self.block_size as f32 * self.target_freq / self.sample_rate;
        self.coef = 2.0 * (2.0 * PI * k / self.block_size as f32).cos();
    }

    /// Retune to a new target frequency in place, keeping filter memory
    /// (`s1`/`s2`) rather than reconstructing — cheaper per-update at the
    /// cost of a small transient, which is acceptable at AFC update rates.
    pub fn retune(&mut self, target_freq: f32) {
        self.target_freq = target_freq;
        self.recompute_coef();
    }

    pub fn target_frequency(&self) -> f32 {
        self.target_freq
    }

    /// Feed one sample. Returns `Some(power)` once `block_size` samples have
    /// accumulated (and resets for the next block).
    pub fn process(&mut self, sample: f32) -> Option<f32> {
        let s0 = sample + self.coef * self.s1 - self.s2;
        self.s2 = self.s1;
        self.s1 = s0;
        self.samples_seen += 1;

        if self.samples_seen >= self.block_size {
            let power = self.s1 * self.s1 + self.s2 * self.s2 - self.coef * self.s1 * self.s2;
            self.s1 = 0.0;
            self.s2 = 0.0;
            self.samples_seen = 0;
            Some(power)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
        self.samples_seen = 0;
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

/// Pairs two Goertzel filters (mark, space) and produces a normalized
/// correlation in `[-1, 1]`: `(P_mark - P_space) / (P_mark + P_space)`.
pub struct FskCorrelator {
    mark: GoertzelFilter,
    space: GoertzelFilter,
}

impl FskCorrelator {
    pub fn new(mark_freq: f32, space_freq: f32, sample_rate: f32, block_size: usize) -> Self {
        Self {
            mark: GoertzelFilter::new(mark_freq, sample_rate, block_size),
            space: GoertzelFilter::new(space_freq, sample_rate, block_size),
        }
    }

    /// Block size used for timing: `max(64, samples_per_bit / 4)`, giving
    /// four correlation samples per bit — enough for mid-bit timing.
    pub fn block_size_for(samples_per_bit: usize) -> usize {
        (samples_per_bit / 4).max(64)
    }

    pub fn process(&mut self, sample: f32) -> Option<f32> {
        let p_mark = self.mark.process(sample);
        let p_space = self.space.process(sample);
        match (p_mark, p_space) {
            (Some(pm), Some(ps)) => {
                let denom = pm + ps;
                let corr = if denom > 1e-12 { (pm - ps) / denom } else { 0.0 };
                Some(corr.clamp(-1.0, 1.0))
            }
            _ => None,
        }
    }

    pub fn retune(&mut self, mark_freq: f32, space_freq: f32) {
        self.mark.retune(mark_freq);
        self.space.retune(space_freq);
    }

    pub fn reset(&mut self) {
        self.mark.reset();
        self.space.reset();
    }

    pub fn mark_frequency(&self) -> f32 {
        self.mark.target_frequency()
    }

    pub fn space_frequency(&self) -> f32 {
        self.space.target_frequency()
    }
}
