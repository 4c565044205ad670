//! RTTY (Baudot / FSK) single-channel modem

pub mod demodulator;
pub mod modulator;

pub use demodulator::RttyDemodulator;
pub use modulator::RttyModulator;
