use shiftkey::codec::BaudotCodec;
use shiftkey::dsp::SineGenerator;
use shiftkey::{RttyConfig, RttyDemodulator};

mod support;
use support::levenshtein_ratio;

/// Encode `text` with a linear frequency drift from `-total_drift_hz/2` to
/// `+total_drift_hz/2` applied to both mark and space tones across the
/// message. `RttyModulator` has no drift knob (drift is a channel effect,
/// not something the transmitter itself does), so this duplicates its
/// framing logic with a time-varying tone target.
fn encode_with_linear_drift(text: &str, config: &RttyConfig, total_drift_hz: f64) -> Vec<f32> {
    let mut codec = BaudotCodec::new();
    let codes = codec.encode_with_preamble(text, 2);
    let samples_per_bit = config.samples_per_bit();

    let mut segments: Vec<(bool, usize)> = Vec::new();
    for &code in &codes {
        segments.push((false, samples_per_bit)); // start: space
        for i in 0..5 {
            segments.push(((code >> i) & 1 == 1, samples_per_bit)); // data, LSB first
        }
        segments.push((true, samples_per_bit * 3 / 2)); // 1.5 stop bits: mark
    }

    let total_samples: usize = segments.iter().map(|(_, n)| n).sum();
    let mut gen = SineGenerator::new(config.mark_frequency, config.sample_rate as f64);
    let mut samples = Vec::with_capacity(total_samples);
    let mut produced = 0usize;

    for (mark, n) in segments {
        for _ in 0..n {
            let t = produced as f64 / total_samples.max(1) as f64;
            let drift = (t - 0.5) * total_drift_hz;
            let base = if mark { config.mark_frequency } else { config.space_frequency() };
            gen.set_frequency(base + drift);
            samples.push(gen.next_sample());
            produced += 1;
        }
    }
    samples
}

#[test]
fn linear_drift_decodes_well_with_afc_enabled() {
    let text = "CQ CQ CQ DE W1AW K";
    let mut config = RttyConfig::standard();
    config.afc_enabled = true;

    let drifted = encode_with_linear_drift(text, &config, 50.0); // +/- 25 Hz
    let mut demod = RttyDemodulator::new(config);
    let decoded: String = demod.process(&drifted).into_iter().collect();

    assert!(levenshtein_ratio(text, &decoded) >= 0.95, "decoded: {decoded:?}");
}

#[test]
fn linear_drift_degrades_sharply_with_afc_disabled() {
    let text = "CQ CQ CQ DE W1AW K";
    let mut config = RttyConfig::standard();
    config.afc_enabled = false;

    let drifted = encode_with_linear_drift(text, &config, 50.0);
    let mut demod = RttyDemodulator::new(config);
    let decoded: String = demod.process(&drifted).into_iter().collect();

    assert!(levenshtein_ratio(text, &decoded) <= 0.20, "decoded: {decoded:?}");
}

#[test]
fn afc_cumulative_offset_stays_within_fifty_hz() {
    let text = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG REPEATED FOR LENGTH";
    let mut config = RttyConfig::standard();
    config.afc_enabled = true;

    // Drive well past any realistic drift to exercise the clamp.
    let drifted = encode_with_linear_drift(text, &config, 400.0);
    let mut demod = RttyDemodulator::new(config.clone());
    demod.process(&drifted);

    let deviation = (demod.tracked_frequency() - config.mark_frequency).abs();
    assert!(deviation <= 50.0 + 1e-6, "deviation {deviation} exceeded bound");
}
