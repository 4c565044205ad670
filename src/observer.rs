//! Observer boundary for decoded-character and signal-change events
//!
//! The source delivers events through an optional delegate reference; the
//! port here is the same boundary idea as `ports::AudioInput`/`AudioOutput`
//! in a hexagonal layout — a small trait any caller implements, with no
//! heap allocation per event (every event type is a stack-allocated value
//! record). Implementations must enqueue and return promptly: the core
//! calls these synchronously from the sample-producer context and must
//! never block on a subscriber.

use crate::domain::{CharacterEvent, ChannelsChangedEvent, SignalChangeEvent};

pub trait DemodulatorObserver {
    fn on_character(&mut self, event: CharacterEvent);
    fn on_signal_change(&mut self, event: SignalChangeEvent);

    /// Default no-op: most single-channel callers never need this.
    fn on_channels_changed(&mut self, _event: ChannelsChangedEvent) {}
}

/// A no-op observer, useful for decoders driven purely by polling
/// `is_signal_detected`/`signal_strength` rather than by event callback.
pub struct NullObserver;

impl DemodulatorObserver for NullObserver {
    fn on_character(&mut self, _event: CharacterEvent) {}
    fn on_signal_change(&mut self, _event: SignalChangeEvent) {}
}
