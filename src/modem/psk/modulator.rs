//! PSK31/63 (BPSK/QPSK, Varicode) modulator
//!
//! Differential encoding: a Varicode bit of 1 keeps the carrier's running
//! phase, a 0 inverts it (BPSK); QPSK consumes two bits per symbol and maps
//! each dibit to one of four `pi/2`-separated phase steps. The raised-cosine
//! envelope dips to (near) zero exactly at the sample where the carrier
//! phase actually flips — `RaisedCosineShaper::midpoint()` — rather than at
//! the symbol's start, which is what an unshaped phase flip at full
//! amplitude would otherwise splatter across the band.

use std::f64::consts::PI;

use crate::codec::varicode;
use crate::domain::{Modulation, PskConfig};
use crate::dsp::{RaisedCosineShaper, SineGenerator};

pub struct PskModulator {
    config: PskConfig,
    carrier: SineGenerator,
    envelope: RaisedCosineShaper,
}

impl PskModulator {
    pub fn new(config: PskConfig) -> Self {
        let carrier = SineGenerator::new(config.center_frequency, config.sample_rate as f64);
        let envelope = RaisedCosineShaper::new(config.samples_per_symbol());
        Self {
            config,
            carrier,
            envelope,
        }
    }

    pub fn config(&self) -> &PskConfig {
        &self.config
    }

    /// Encode `text` with `preamble_ms`/`postamble_ms` of unmodulated
    /// carrier. Empty text with no padding returns an empty buffer.
    pub fn encode_with_envelope(&mut self, text: &str, preamble_ms: f64, postamble_ms: f64) -> Vec<f32> {
        if text.is_empty() && preamble_ms <= 0.0 && postamble_ms <= 0.0 {
            return Vec::new();
        }

        let mut samples = self.generate_idle(preamble_ms / 1000.0);
        let bits = varicode::encode_str(text);
        self.modulate_bits(&bits, &mut samples);
        samples.extend(self.generate_idle(postamble_ms / 1000.0));
        samples
    }

    /// Unmodulated carrier for `duration_s` seconds — preamble, postamble,
    /// or standalone idle.
    pub fn generate_idle(&mut self, duration_s: f64) -> Vec<f32> {
        self.carrier.generate_duration(duration_s)
    }

    fn modulate_bits(&mut self, bits: &[bool], out: &mut Vec<f32>) {
        match self.config.modulation {
            Modulation::Bpsk => {
                for &bit in bits {
                    let phase_step = if bit { 0.0 } else { PI };
                    self.emit_symbol(phase_step, out);
                }
            }
            Modulation::Qpsk => {
                let mut bits = bits.iter();
                loop {
                    let b_hi = match bits.next() {
                        Some(b) => *b,
                        None => break,
                    };
                    let b_lo = *bits.next().unwrap_or(&false);
                    self.emit_symbol(dibit_phase_step(b_hi, b_lo), out);
                }
            }
        }
    }

    fn emit_symbol(&mut self, phase_step: f64, out: &mut Vec<f32>) {
        let phase_change = phase_step.abs() > f64::EPSILON;
        let envelope = self.envelope.generate_envelope(phase_change);
        let midpoint = self.envelope.midpoint();

        for (i, &gain) in envelope.iter().enumerate() {
            if i == midpoint && phase_change {
                self.carrier.adjust_phase(phase_step);
            }
            out.push(self.carrier.next_sample() * gain);
        }
    }
}

/// Gray-coded dibit -> phase step, self-consistent with the demodulator's
/// `bits_from_delta`. No claim of interoperability with any specific
/// existing PSK63 implementation's dibit convention is made (see spec §1).
fn dibit_phase_step(b_hi: bool, b_lo: bool) -> f64 {
    match (b_hi, b_lo) {
        (false, false) => 0.0,
        (false, true) => PI / 2.0,
        (true, true) => PI,
        (true, false) => 3.0 * PI / 2.0,
    }
}
