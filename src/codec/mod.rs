//! Character codecs: Baudot/ITA2 (RTTY) and Varicode (PSK)

pub mod baudot;
pub mod varicode;

pub use baudot::{BaudotCodec, Shift};
pub use varicode::VaricodeDecoder;
