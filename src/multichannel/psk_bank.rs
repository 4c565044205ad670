//! Multi-channel PSK31/63 demodulator bank
//!
//! Same scanning-bank shape as `MultiChannelRtty`: each channel runs its own
//! `PskDemodulator` over the full input block.

use crate::domain::{ChannelId, ChannelsChangedEvent, CharacterEvent, PskConfig, SignalChangeEvent};
use crate::modem::PskDemodulator;
use crate::observer::DemodulatorObserver;

use super::channel::Channel;

struct ChannelState {
    channel: Channel,
    demodulator: PskDemodulator,
    was_detected: bool,
}

pub struct MultiChannelPsk {
    base_config: PskConfig,
    channels: Vec<ChannelState>,
    next_id: u32,
    squelch_level: f32,
    observer: Option<Box<dyn DemodulatorObserver>>,
}

impl MultiChannelPsk {
    /// `base_config`'s `center_frequency` is ignored — each channel supplies
    /// its own, drawn from `frequencies_hz`.
    pub fn new(base_config: PskConfig, frequencies_hz: &[f64]) -> Self {
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
        config.center_frequency = frequency_hz;
        config.squelch_level = self.squelch_level;

        self.channels.push(ChannelState {
            channel: Channel { id, frequency_hz },
            demodulator: PskDemodulator::new(config),
            was_detected: false,
        });

        log::debug!("psk bank: added channel {id:?} at {frequency_hz} Hz");
        self.emit_channels_changed();
        id
    }

    pub fn remove_channel(&mut self, id: ChannelId) {
        self.channels.retain(|s| s.channel.id != id);
        log::debug!("psk bank: removed channel {id:?}");
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

    pub fn process(&mut self, samples: &[f32]) {
        for state in &mut self.channels {
            let decoded = state.demodulator.process(samples);
            let mode = state.demodulator.config().mode();

            let detected = state.demodulator.is_signal_detected();
            if detected != state.was_detected {
                state.was_detected = detected;
                if let Some(observer) = self.observer.as_deref_mut() {
                    observer.on_signal_change(SignalChangeEvent {
                        channel_id: state.channel.id,
                        frequency_hz: state.channel.frequency_hz,
                        mode,
                        detected,
                    });
                }
            }

            for character in decoded {
                if let Some(observer) = self.observer.as_deref_mut() {
                    observer.on_character(CharacterEvent {
                        channel_id: state.channel.id,
                        frequency_hz: state.channel.frequency_hz,
                        mode,
                        character,
                        signal_strength: state.demodulator.signal_strength(),
                    });
                }
            }
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
    use crate::domain::{ChannelGrid, Modulation};

    #[test]
    fn default_grid_seeds_sixteen_channels() {
        let config = PskConfig::psk31(Modulation::Bpsk, 1000.0).unwrap();
        let bank = MultiChannelPsk::new(config, &ChannelGrid::psk_default().frequencies_hz);
        assert_eq!(bank.channels().count(), 16);
    }

    #[test]
    fn add_channel_assigns_increasing_stable_ids() {
        let config = PskConfig::psk31(Modulation::Bpsk, 1000.0).unwrap();
        let mut bank = MultiChannelPsk::new(config, &[]);
        let first = bank.add_channel(1000.0);
        let second = bank.add_channel(1100.0);
        assert_ne!(first, second);
    }

    #[test]
    fn set_squelch_propagates_to_every_channel() {
        let config = PskConfig::psk31(Modulation::Bpsk, 1000.0).unwrap();
        let mut bank = MultiChannelPsk::new(config, &[1000.0, 1100.0]);
        bank.set_squelch(0.5);
        for state in &bank.channels {
            assert_eq!(state.demodulator.config().squelch_level, 0.5);
        }
    }
}
