//! RTTY (Baudot/FSK) demodulator
//!
//! Drives the four-state bit-timing machine from spec: WAITING_FOR_START,
//! IN_START, RECEIVING, IN_STOP, keyed off the normalized mark/space
//! correlation from an `FskCorrelator`. AFC tracks two auxiliary Goertzels
//! at `mark ± 10 Hz`; squelch is the moving average of the last eight
//! correlation magnitudes.

use std::collections::VecDeque;

use crate::codec::BaudotCodec;
use crate::domain::{RttyConfig, SignalSnapshot};
use crate::dsp::{FskCorrelator, GoertzelFilter};

const CORRELATION_THRESHOLD: f32 = 0.2;
const SQUELCH_WINDOW: usize = 8;
const AFC_DELTA_HZ: f64 = 10.0;
const MAX_AFC_OFFSET_HZ: f64 = 50.0;

enum State {
    WaitingForStart,
    InStart { samples_consumed: usize },
    Receiving {
        bit_index: u8,
        samples_consumed: usize,
        accumulator: u8,
    },
    InStop { samples_consumed: usize },
}

/// Tracks wing energy at `mark ± AFC_DELTA_HZ` and nudges a bounded
/// cumulative frequency offset toward whichever wing carries more power.
struct AfcTracker {
    upper: GoertzelFilter,
    lower: GoertzelFilter,
    cumulative_offset: f64,
    samples_since_signal: usize,
    reset_after_samples: usize,
}

impl AfcTracker {
    fn new(mark_freq: f64, sample_rate: u32, block_size: usize) -> Self {
        Self {
            upper: GoertzelFilter::new((mark_freq + AFC_DELTA_HZ) as f32, sample_rate as f32, block_size),
            lower: GoertzelFilter::new((mark_freq - AFC_DELTA_HZ) as f32, sample_rate as f32, block_size),
            cumulative_offset: 0.0,
            samples_since_signal: 0,
            reset_after_samples: sample_rate as usize,
        }
    }

    fn process(&mut self, sample: f32, tracking: bool) {
        let pu = self.upper.process(sample);
        let pl = self.lower.process(sample);

        if tracking {
            self.samples_since_signal = 0;
            if let (Some(pu), Some(pl)) = (pu, pl) {
                let denom = pu + pl;
                if denom > 1e-12 {
                    let error = ((pu - pl) / denom) as f64;
                    self.cumulative_offset = (self.cumulative_offset + error * AFC_DELTA_HZ * 0.1)
                        .clamp(-MAX_AFC_OFFSET_HZ, MAX_AFC_OFFSET_HZ);
                }
            }
        } else {
            self.samples_since_signal += 1;
            if self.samples_since_signal >= self.reset_after_samples {
                self.cumulative_offset = 0.0;
            }
        }
    }

    fn offset_hz(&self) -> f64 {
        self.cumulative_offset
    }

    fn retune(&mut self, mark_freq: f64) {
        self.upper.retune((mark_freq + AFC_DELTA_HZ) as f32);
        self.lower.retune((mark_freq - AFC_DELTA_HZ) as f32);
    }

    fn reset(&mut self) {
        self.upper.reset();
        self.lower.reset();
        self.cumulative_offset = 0.0;
        self.samples_since_signal = 0;
    }
}

pub struct RttyDemodulator {
    config: RttyConfig,
    correlator: FskCorrelator,
    afc: AfcTracker,
    codec: BaudotCodec,
    state: State,
    latest_corr: f32,
    tracking: bool,
    pending_accumulator: u8,
    squelch_window: VecDeque<f32>,
    signal: SignalSnapshot,
}

impl RttyDemodulator {
    pub fn new(config: RttyConfig) -> Self {
        let samples_per_bit = config.samples_per_bit();
        let block_size = FskCorrelator::block_size_for(samples_per_bit);
        let (mark, space) = Self::tones(&config);

        Self {
            correlator: FskCorrelator::new(mark as f32, space as f32, config.sample_rate as f32, block_size),
            afc: AfcTracker::new(mark, config.sample_rate, block_size),
            codec: BaudotCodec::new(),
            state: State::WaitingForStart,
            latest_corr: 0.0,
            tracking: false,
            pending_accumulator: 0,
            squelch_window: VecDeque::with_capacity(SQUELCH_WINDOW),
            signal: SignalSnapshot::new(),
            config,
        }
    }

    pub fn config(&self) -> &RttyConfig {
        &self.config
    }

    pub fn signal_strength(&self) -> f32 {
        self.signal.strength()
    }

    pub fn is_signal_detected(&self) -> bool {
        self.signal.detected()
    }

    /// Live squelch knob: unlike most configuration fields this is meant to
    /// be adjusted without reconstructing the demodulator and losing decode
    /// state.
    pub fn set_squelch_level(&mut self, level: f32) {
        self.config.squelch_level = level;
    }

    /// Configured mark frequency plus the current AFC offset.
    pub fn tracked_frequency(&self) -> f64 {
        let (mark, _space) = Self::tones(&self.config);
        mark + self.afc.offset_hz()
    }

    /// Feed a block of samples, driving the bit-timing state machine.
    /// Returns every character decoded within this call, in order.
    pub fn process(&mut self, samples: &[f32]) -> Vec<char> {
        let samples_per_bit = self.config.samples_per_bit();
        let mut out = Vec::new();

        for &sample in samples {
            if let Some(corr) = self.correlator.process(sample) {
                self.latest_corr = corr;
                self.squelch_window.push_back(corr.abs());
                if self.squelch_window.len() > SQUELCH_WINDOW {
                    self.squelch_window.pop_front();
                }
                let strength = self.average_strength();
                self.tracking = strength > CORRELATION_THRESHOLD;
                self.signal.store(strength, self.tracking);

                if self.config.afc_enabled && self.tracking {
                    let offset = self.afc.offset_hz();
                    self.afc.process(sample, true);
                    if (self.afc.offset_hz() - offset).abs() > f64::EPSILON {
                        self.retune_to_offset();
                    }
                } else if self.config.afc_enabled {
                    self.afc.process(sample, false);
                    if self.afc.offset_hz() == 0.0 {
                        self.retune_to_offset();
                    }
                }
            } else if self.config.afc_enabled {
                self.afc.process(sample, self.tracking);
            }

            if let Some(ch) = self.step(samples_per_bit) {
                if self.signal.strength() >= self.config.squelch_level {
                    out.push(ch);
                } else {
                    log::debug!("rtty: character suppressed by squelch");
                }
            }
        }

        out
    }

    fn step(&mut self, samples_per_bit: usize) -> Option<char> {
        let corr = self.latest_corr;
        match self.state {
            State::WaitingForStart => {
                if corr < -CORRELATION_THRESHOLD {
                    self.state = State::InStart { samples_consumed: 0 };
                }
                None
            }
            State::InStart { samples_consumed } => {
                if corr > CORRELATION_THRESHOLD {
                    log::debug!("rtty: false start rejected");
                    self.state = State::WaitingForStart;
                } else {
                    let samples_consumed = samples_consumed + 1;
                    if samples_consumed >= samples_per_bit {
                        self.state = State::Receiving {
                            bit_index: 0,
                            samples_consumed: 0,
                            accumulator: 0,
                        };
                    } else {
                        self.state = State::InStart { samples_consumed };
                    }
                }
                None
            }
            State::Receiving {
                bit_index,
                samples_consumed,
                accumulator,
            } => {
                let mut accumulator = accumulator;
                let samples_consumed = samples_consumed + 1;

                if samples_consumed == samples_per_bit / 2 && corr > CORRELATION_THRESHOLD {
                    accumulator |= 1 << bit_index;
                }

                if samples_consumed >= samples_per_bit {
                    let bit_index = bit_index + 1;
                    if bit_index >= 5 {
                        self.pending_accumulator = accumulator;
                        self.state = State::InStop { samples_consumed: 0 };
                    } else {
                        self.state = State::Receiving {
                            bit_index,
                            samples_consumed: 0,
                            accumulator,
                        };
                    }
                } else {
                    self.state = State::Receiving {
                        bit_index,
                        samples_consumed,
                        accumulator,
                    };
                }
                None
            }
            State::InStop { samples_consumed } => {
                let samples_consumed = samples_consumed + 1;
                if samples_consumed >= samples_per_bit * 3 / 2 {
                    self.state = State::WaitingForStart;
                    self.codec.decode_code(self.pending_accumulator)
                } else {
                    self.state = State::InStop { samples_consumed };
                    None
                }
            }
        }
    }

    fn average_strength(&self) -> f32 {
        if self.squelch_window.is_empty() {
            return 0.0;
        }
        self.squelch_window.iter().sum::<f32>() / self.squelch_window.len() as f32
    }

    fn retune_to_offset(&mut self) {
        let (mark, space) = Self::tones(&self.config);
        let offset = self.afc.offset_hz();
        let new_mark = mark + offset;
        let new_space = if mark > space { new_mark - self.config.shift } else { new_mark + self.config.shift };
        self.correlator.retune(new_mark as f32, new_space as f32);
        self.afc.retune(new_mark);
    }

    /// Mark/space tones, honoring `polarity_inverted` and the static
    /// `frequency_offset` applied ahead of AFC tracking.
    fn tones(config: &RttyConfig) -> (f64, f64) {
        let mark = config.mark_frequency + config.frequency_offset;
        let space = mark - config.shift;
        if config.polarity_inverted {
            (space, mark)
        } else {
            (mark, space)
        }
    }

    pub fn reset(&mut self) {
        self.correlator.reset();
        self.afc.reset();
        self.codec.reset();
        self.state = State::WaitingForStart;
        self.latest_corr = 0.0;
        self.tracking = false;
        self.squelch_window.clear();
        self.signal.store(0.0, false);
    }
}
