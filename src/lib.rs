//! shiftkey — a software modem for narrow-band amateur radio digital modes
//!
//! RTTY (5-bit Baudot over FSK) and the PSK family (PSK31/63, BPSK/QPSK,
//! Varicode framing). Ingests mono audio and emits decoded characters
//! tagged by the frequency of the detected signal; encodes text into a
//! sample buffer for playback. Audio I/O, persistence, and UI are left to
//! the caller — this crate is the modem core only.
//!
//! ## Architecture
//!
//! - `domain/` — pure value types: configuration records, errors, events
//! - `dsp/` — signal processing primitives, no I/O
//! - `codec/` — Baudot/ITA2 and Varicode character codecs
//! - `modem/` — single-channel RTTY and PSK modulators/demodulators
//! - `multichannel/` — banks of single-channel demodulators over a frequency grid
//! - `observer` — the event-delivery boundary a caller implements

pub mod codec;
pub mod domain;
pub mod dsp;
pub mod modem;
pub mod multichannel;
pub mod observer;

pub use domain::{
    ChannelGrid, ChannelId, CharacterEvent, ChannelsChangedEvent, Mode, ModemError, ModemResult,
    Modulation, MultiChannelConfig, PskConfig, RttyConfig, SignalChangeEvent, SignalSnapshot,
};
pub use modem::{PskDemodulator, PskModulator, RttyDemodulator, RttyModulator};
pub use multichannel::{Channel, MultiChannelPsk, MultiChannelRtty};
pub use observer::{DemodulatorObserver, NullObserver};
