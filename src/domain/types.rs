//! Core domain types

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Audio sample type (32-bit float, normalized to approximately [-1.0, 1.0])
pub type AudioSample = f32;

/// Stable opaque identifier for a channel in a multi-channel demodulator.
///
/// Frequency is a mutable attribute of a channel (AFC retunes it); identity
/// is not, so callers can track "the fourth speaker" across a retune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub u32);

/// A supported or recognized-but-stubbed digital mode.
///
/// `Olivia` is recognized so that callers matching on `Mode` need only
/// extend one site when a future FEC mode is implemented; it produces no
/// samples and decodes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Rtty,
    Bpsk31,
    Qpsk31,
    Bpsk63,
    Qpsk63,
    Olivia,
}

impl Mode {
    /// Whether this mode variant has a real modulator/demodulator behind it.
    pub fn is_implemented(self) -> bool {
        !matches!(self, Mode::Olivia)
    }

    pub fn is_psk(self) -> bool {
        matches!(
            self,
            Mode::Bpsk31 | Mode::Qpsk31 | Mode::Bpsk63 | Mode::Qpsk63
        )
    }

    pub fn is_rtty(self) -> bool {
        matches!(self, Mode::Rtty)
    }
}

/// A decoded-character event, as delivered by `DemodulatorObserver::on_character`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterEvent {
    pub channel_id: ChannelId,
    pub frequency_hz: f64,
    pub mode: Mode,
    pub character: char,
    pub signal_strength: f32,
}

/// A signal-detected-changed event, as delivered by `DemodulatorObserver::on_signal_change`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalChangeEvent {
    pub channel_id: ChannelId,
    pub frequency_hz: f64,
    pub mode: Mode,
    pub detected: bool,
}

/// A channels-changed event, published after any add/remove or AFC retune.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelsChangedEvent {
    pub channels: Vec<(ChannelId, f64)>,
}

/// Lock-free snapshot of the two scalars a non-owning reader (e.g. a VU
/// meter on a UI thread) is allowed to observe without touching core state.
///
/// The core mutates these via `Ordering::Relaxed` stores from the single
/// producer context; readers load them the same way. Neither operation can
/// race meaningfully because both fields are independent scalars, not a
/// struct invariant spanning both.
#[derive(Debug)]
pub struct SignalSnapshot {
    strength_bits: AtomicU32,
    detected: AtomicBool,
}

impl SignalSnapshot {
    pub fn new() -> Self {
        Self {
            strength_bits: AtomicU32::new(0f32.to_bits()),
            detected: AtomicBool::new(false),
        }
    }

    pub fn store(&self, strength: f32, detected: bool) {
        self.strength_bits.store(strength.to_bits(), Ordering::Relaxed);
        self.detected.store(detected, Ordering::Relaxed);
    }

    pub fn strength(&self) -> f32 {
        f32::from_bits(self.strength_bits.load(Ordering::Relaxed))
    }

    pub fn detected(&self) -> bool {
        self.detected.load(Ordering::Relaxed)
    }
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
