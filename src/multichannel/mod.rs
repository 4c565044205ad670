//! Multi-channel demodulator banks: parallel single-channel modems scanning
//! a fixed frequency grid, with per-channel AFC (RTTY) and squelch.

pub mod channel;
pub mod psk_bank;
pub mod rtty_bank;

pub use channel::Channel;
pub use psk_bank::MultiChannelPsk;
pub use rtty_bank::MultiChannelRtty;
