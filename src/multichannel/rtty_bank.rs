//! Multi-channel RTTY demodulator bank
//!
//! Each channel independently runs a full `RttyDemodulator` over the same
//! input block — this is a parallel bank of single-channel demodulators
//! scanning the passband, not a sample-splitting demultiplexer.

use crate::domain::{ChannelId, ChannelsChangedEvent, CharacterEvent, Mode, RttyConfig, SignalChangeEvent};
use crate::modem::RttyDemodulator;
use crate::observer::DemodulatorObserver;

use super::channel::Channel;

struct ChannelState {
    channel: Channel,
    demodulator: RttyDemodulator,
    was_detected: bool,
}

/// A bank of `RttyDemodulator`s over a frequency grid, with a shared
/// observer and propagated squelch level.
pub struct MultiChannelRtty {
    base_config: RttyConfig,
    channels: Vec<ChannelState>,
    next_id: u32,
    squelch_level: f32,
    observer: Option<Box<dyn DemodulatorObserver>>,
}

impl MultiChannelRtty {
    /// `base_config`'s `mark_frequency` is ignored — each channel supplies
    /// its own, drawn from `frequencies_hz`.
    pub fn new(base_config: RttyConfig, frequencies_hz: &[f64]) -> Self {
        let mut bank = Self {
            squelch_level: base_config.squelch_level,
            base_config,
            channels: Vec::new(),
            next_id: 0,
            observer: None,
        };
        for &freq in frequencies_hz {
            bank.add_channel(freq);
        }
        bank
    }

    pub fn set_observer(&mut self, observer: Box<dyn DemodulatorObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().map(|s| s.channel)
    }

    pub fn add_channel(&mut self, frequency_hz: f64) -> ChannelId {
        let id = ChannelId(self.next_id);
        self.next_id += 1;

        let mut config = self.base_config.clone();
        config.mark_frequency = frequency_hz;
        config.squelch_level = self.squelch_level;

        self.channels.push(ChannelState {
            channel: Channel { id, frequency_hz },
            demodulator: RttyDemodulator::new(config),
            was_detected: false,
        });

        log::debug!("rtty bank: added channel {id:?} at {frequency_hz} Hz");
        self.emit_channels_changed();
        id
    }

    pub fn remove_channel(&mut self, id: ChannelId) {
        self.channels.retain(|s| s.channel.id != id);
        log::debug!("rtty bank: removed channel {id:?}");
        self.emit_channels_changed();
    }

    pub fn set_squelch(&mut self, level: f32) {
        self.squelch_level = level;
        for state in &mut self.channels {
            state.demodulator.set_squelch_level(level);
        }
    }

    pub fn reset(&mut self) {
        for state in &mut self.channels {
            state.demodulator.reset();
            state.was_detected = false;
        }
    }

    /// Run every channel over `samples`, delivering `on_character` and
    /// `on_signal_change` (and `on_channels_changed` if AFC moved any
    /// channel's tracked frequency) to the registered observer, in channel
    /// scan order.
    pub fn process(&mut self, samples: &[f32]) {
        let mut frequencies_changed = false;

        for state in &mut self.channels {
            let decoded = state.demodulator.process(samples);

            let detected = state.demodulator.is_signal_detected();
            if detected != state.was_detected {
                state.was_detected = detected;
                if let Some(observer) = self.observer.as_deref_mut() {
                    observer.on_signal_change(SignalChangeEvent {
                        channel_id: state.channel.id,
                        frequency_hz: state.channel.frequency_hz,
                        mode: Mode::Rtty,
                        detected,
                    });
                }
            }

            for character in decoded {
                if let Some(observer) = self.observer.as_deref_mut() {
                    observer.on_character(CharacterEvent {
                        channel_id: state.channel.id,
                        frequency_hz: state.channel.frequency_hz,
                        mode: Mode::Rtty,
                        character,
                        signal_strength: state.demodulator.signal_strength(),
                    });
                }
            }

            let tracked = state.demodulator.tracked_frequency();
            if (tracked - state.channel.frequency_hz).abs() > 0.5 {
                state.channel.frequency_hz = tracked;
                frequencies_changed = true;
            }
        }

        if frequencies_changed {
            self.emit_channels_changed();
        }
    }

    fn emit_channels_changed(&mut self) {
        if let Some(observer) = self.observer.as_deref_mut() {
            let channels = self
                .channels
                .iter()
                .map(|s| (s.channel.id, s.channel.frequency_hz))
                .collect();
            observer.on_channels_changed(ChannelsChangedEvent { channels });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterEvent, ChannelsChangedEvent, SignalChangeEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::modem::RttyModulator;

    #[derive(Default)]
    struct Recorded {
        characters: Vec<CharacterEvent>,
        signal_changes: Vec<SignalChangeEvent>,
    }

    struct RecordingObserver(Rc<RefCell<Recorded>>);

    impl DemodulatorObserver for RecordingObserver {
        fn on_character(&mut self, event: CharacterEvent) {
            self.0.borrow_mut().characters.push(event);
        }
        fn on_signal_change(&mut self, event: SignalChangeEvent) {
            self.0.borrow_mut().signal_changes.push(event);
        }
        fn on_channels_changed(&mut self, _event: ChannelsChangedEvent) {}
    }

    #[test]
    fn default_grid_seeds_eight_channels() {
        let bank = MultiChannelRtty::new(RttyConfig::standard(), &crate::domain::ChannelGrid::rtty_default().frequencies_hz);
        assert_eq!(bank.channels().count(), 8);
    }

    #[test]
    fn remove_channel_drops_it_from_the_bank() {
        let mut bank = MultiChannelRtty::new(RttyConfig::standard(), &[1955.0, 2125.0]);
        let id = bank.channels().next().unwrap().id;
        bank.remove_channel(id);
        assert_eq!(bank.channels().count(), 1);
    }

    #[test]
    fn decodes_a_single_channel_among_several_on_the_grid() {
        let config = RttyConfig::standard();
        let mut modulator = RttyModulator::new(config.clone());
        let samples = modulator.encode_with_idle("CQ CQ K", 300.0, 100.0);

        let mut bank = MultiChannelRtty::new(config, &crate::domain::ChannelGrid::rtty_default().frequencies_hz);
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        bank.set_observer(Box::new(RecordingObserver(recorded.clone())));

        bank.process(&samples);

        let decoded: String = recorded.borrow().characters.iter().map(|e| e.character).collect();
        assert!(decoded.contains("CQ CQ K"));
    }
}
