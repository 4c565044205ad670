//! Digital Signal Processing
//!
//! Pure functions and small stateful processors. No I/O dependencies.

pub mod agc;
pub mod analysis;
pub mod biquad;
pub mod clock_recovery;
pub mod costas;
pub mod envelope;
pub mod goertzel;
pub mod sine_generator;

pub use agc::Agc;
pub use biquad::{BandpassFilter, CascadedBandpassFilter};
pub use clock_recovery::ClockRecovery;
pub use costas::CarrierTracker;
pub use envelope::RaisedCosineShaper;
pub use goertzel::{FskCorrelator, GoertzelFilter};
pub use sine_generator::SineGenerator;
