//! PSK31/63 (BPSK/QPSK, Varicode) single-channel modem

pub mod demodulator;
pub mod modulator;

pub use demodulator::PskDemodulator;
pub use modulator::PskModulator;
