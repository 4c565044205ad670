//! RTTY (Baudot/FSK) modulator
//!
//! Framing: 1 start bit (space) + 5 data bits LSB-first (1 = mark, 0 =
//! space) + 1.5 stop bits (mark). Idle between characters, the preamble, and
//! the postamble are all continuous mark, produced by the same phase-
//! continuous `SineGenerator` so a tone switch never clicks.

use crate::codec::BaudotCodec;
use crate::domain::RttyConfig;
use crate::dsp::SineGenerator;

/// Taper applied to the very start/end of the buffer to bound transients.
const TAPER_MS: f64 = 2.0;

pub struct RttyModulator {
    config: RttyConfig,
    codec: BaudotCodec,
}

impl RttyModulator {
    pub fn new(config: RttyConfig) -> Self {
        Self {
            config,
            codec: BaudotCodec::new(),
        }
    }

    pub fn config(&self) -> &RttyConfig {
        &self.config
    }

    /// Encode `text` with `preamble_ms`/`postamble_ms` of mark-tone idle
    /// padding. Empty text with no padding returns an empty buffer.
    pub fn encode_with_idle(&mut self, text: &str, preamble_ms: f64, postamble_ms: f64) -> Vec<f32> {
        if text.is_empty() && preamble_ms <= 0.0 && postamble_ms <= 0.0 {
            return Vec::new();
        }

        let codes = self.codec.encode_with_preamble(text, 2);
        let mut gen = SineGenerator::new(self.mark_frequency(), self.config.sample_rate as f64);

        let mut samples = gen.generate_duration(preamble_ms / 1000.0);

        let samples_per_bit = self.config.samples_per_bit();
        for code in codes {
            self.emit_character(&mut gen, code, samples_per_bit, &mut samples);
        }

        samples.extend(gen.generate_duration(postamble_ms / 1000.0));

        let taper_len = (self.config.sample_rate as f64 * TAPER_MS / 1000.0) as usize;
        taper_edges(&mut samples, taper_len);
        samples
    }

    /// Continuous mark tone for `duration_s` seconds — idle/preamble/postamble.
    pub fn generate_idle(&self, duration_s: f64) -> Vec<f32> {
        let mut gen = SineGenerator::new(self.mark_frequency(), self.config.sample_rate as f64);
        gen.generate_duration(duration_s)
    }

    fn emit_character(&self, gen: &mut SineGenerator, code: u8, samples_per_bit: usize, out: &mut Vec<f32>) {
        self.emit_bit(gen, false, samples_per_bit, out); // start bit: space
        for i in 0..5 {
            let bit = (code >> i) & 1 == 1; // LSB first
            self.emit_bit(gen, bit, samples_per_bit, out);
        }
        self.emit_bit(gen, true, samples_per_bit * 3 / 2, out); // 1.5 stop bits: mark
    }

    fn emit_bit(&self, gen: &mut SineGenerator, mark: bool, n: usize, out: &mut Vec<f32>) {
        gen.set_frequency(if mark {
            self.mark_frequency()
        } else {
            self.space_frequency()
        });
        out.extend(gen.generate(n));
    }

    fn mark_frequency(&self) -> f64 {
        if self.config.polarity_inverted {
            self.config.space_frequency()
        } else {
            self.config.mark_frequency
        }
    }

    fn space_frequency(&self) -> f64 {
        if self.config.polarity_inverted {
            self.config.mark_frequency
        } else {
            self.config.space_frequency()
        }
    }
}

fn taper_edges(samples: &mut [f32], taper_len: usize) {
    let n = samples.len();
    let taper_len = taper_len.min(n / 2);
    for i in 0..taper_len {
        let gain = i as f32 / taper_len as f32;
        samples[i] *= gain;
        samples[n - 1 - i] *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_and_idle_yields_empty_buffer() {
        let mut modulator = RttyModulator::new(RttyConfig::standard());
        assert!(modulator.encode_with_idle("", 0.0, 0.0).is_empty());
    }

    #[test]
    fn preamble_only_produces_mark_tone_samples() {
        let mut modulator = RttyModulator::new(RttyConfig::standard());
        let samples = modulator.encode_with_idle("", 100.0, 0.0);
        let expected = (0.1 * 48_000.0).round() as usize;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn generate_idle_matches_requested_duration() {
        let modulator = RttyModulator::new(RttyConfig::standard());
        let samples = modulator.generate_idle(0.25);
        assert_eq!(samples.len(), 12_000);
    }

    #[test]
    fn encoded_buffer_includes_preamble_body_and_postamble() {
        let mut modulator = RttyModulator::new(RttyConfig::standard());
        let samples_per_bit = modulator.config().samples_per_bit();
        let codes = BaudotCodec::new().encode_with_preamble("K", 2);
        let body_len = codes.len() * samples_per_bit * 13 / 2; // ~7.5 bits/char incl. stop
        let samples = modulator.encode_with_idle("K", 500.0, 200.0);
        assert!(samples.len() > body_len / 2);
    }
}
