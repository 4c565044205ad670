//! Single-channel modems: RTTY (Baudot/FSK) and PSK31/63 (Varicode/BPSK-QPSK)

pub mod psk;
pub mod rtty;

pub use psk::{PskDemodulator, PskModulator};
pub use rtty::{RttyDemodulator, RttyModulator};
