//! Configuration value types
//!
//! All configuration is plain, serializable, immutable-once-built data.
//! Processors hold a configuration by value and are reconstructed (not
//! mutated) when the configuration changes, per the "fluent copies → value
//! constructors" design note: re-create the record and its dependent
//! processors atomically so a processor's internal state is never
//! inconsistent with its own configuration.

use serde::{Deserialize, Serialize};

use super::error::{ModemError, ModemResult};

fn default_sample_rate() -> u32 {
    48_000
}

fn default_true() -> bool {
    true
}

/// Phase-shift modulation scheme for a PSK channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modulation {
    Bpsk,
    Qpsk,
}

/// Immutable RTTY (Baudot/FSK) configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RttyConfig {
    /// Bits per second. Typical values: 45.45, 50, 75.
    pub baud_rate: f64,
    /// Audio frequency of the mark tone, Hz.
    pub mark_frequency: f64,
    /// Mark minus space, Hz. Standard RTTY shift is 170 Hz.
    pub shift: f64,
    /// Mono sample rate, Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Swap mark/space roles.
    #[serde(default)]
    pub polarity_inverted: bool,
    /// Static offset added to `mark_frequency` before AFC tracking.
    #[serde(default)]
    pub frequency_offset: f64,
    /// Minimum signal strength in [0, 1] for character emission.
    #[serde(default)]
    pub squelch_level: f32,
    /// Enable per-channel AFC.
    #[serde(default = "default_true")]
    pub afc_enabled: bool,
}

impl RttyConfig {
    pub fn new(baud_rate: f64, mark_frequency: f64, shift: f64, sample_rate: u32) -> ModemResult<Self> {
        let cfg = Self {
            baud_rate,
            mark_frequency,
            shift,
            sample_rate,
            polarity_inverted: false,
            frequency_offset: 0.0,
            squelch_level: 0.0,
            afc_enabled: true,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Standard 45.45 baud / 2125 Hz mark / 170 Hz shift / 48 kHz configuration.
    pub fn standard() -> Self {
        Self::new(45.45, 2125.0, 170.0, 48_000).expect("standard RTTY config is always valid")
    }

    fn validate(&self) -> ModemResult<()> {
        if self.baud_rate <= 0.0 {
            return Err(ModemError::Config("baud_rate must be positive".into()));
        }
        if self.mark_frequency <= 0.0 {
            return Err(ModemError::Config("mark_frequency must be positive".into()));
        }
        if self.shift <= 0.0 {
            return Err(ModemError::Config("shift must be positive".into()));
        }
        if self.sample_rate == 0 {
            return Err(ModemError::Config("sample_rate must be positive".into()));
        }
        if self.mark_frequency - self.shift <= 0.0 {
            return Err(ModemError::Config(
                "mark_frequency - shift (space frequency) must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The space (logic-0) tone frequency, honoring `polarity_inverted`.
    pub fn space_frequency(&self) -> f64 {
        self.mark_frequency - self.shift
    }

    /// Samples per bit, rounded to the nearest whole sample.
    pub fn samples_per_bit(&self) -> usize {
        (self.sample_rate as f64 / self.baud_rate).round() as usize
    }
}

/// Immutable PSK (Varicode over BPSK/QPSK) configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PskConfig {
    pub modulation: Modulation,
    /// Symbols per second. Standard values: 31.25 (PSK31), 62.5 (PSK63).
    pub baud_rate: f64,
    /// Carrier audio frequency, Hz.
    pub center_frequency: f64,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default)]
    pub squelch_level: f32,
    #[serde(default)]
    pub afc_enabled: bool,
}

impl PskConfig {
    pub fn new(
        modulation: Modulation,
        baud_rate: f64,
        center_frequency: f64,
        sample_rate: u32,
    ) -> ModemResult<Self> {
        let cfg = Self {
            modulation,
            baud_rate,
            center_frequency,
            sample_rate,
            squelch_level: 0.0,
            afc_enabled: false,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn psk31(modulation: Modulation, center_frequency: f64) -> ModemResult<Self> {
        Self::new(modulation, 31.25, center_frequency, 48_000)
    }

    pub fn psk63(modulation: Modulation, center_frequency: f64) -> ModemResult<Self> {
        Self::new(modulation, 62.5, center_frequency, 48_000)
    }

    fn validate(&self) -> ModemResult<()> {
        if self.baud_rate <= 0.0 {
            return Err(ModemError::Config("baud_rate must be positive".into()));
        }
        if self.center_frequency <= 0.0 {
            return Err(ModemError::Config("center_frequency must be positive".into()));
        }
        if self.sample_rate == 0 {
            return Err(ModemError::Config("sample_rate must be positive".into()));
        }
        Ok(())
    }

    /// Samples per symbol, rounded to the nearest whole sample.
    pub fn samples_per_symbol(&self) -> usize {
        (self.sample_rate as f64 / self.baud_rate).round() as usize
    }

    pub fn mode(&self) -> super::types::Mode {
        use super::types::Mode;
        match (self.modulation, self.baud_rate) {
            (Modulation::Bpsk, b) if b <= 40.0 => Mode::Bpsk31,
            (Modulation::Qpsk, b) if b <= 40.0 => Mode::Qpsk31,
            (Modulation::Bpsk, _) => Mode::Bpsk63,
            (Modulation::Qpsk, _) => Mode::Qpsk63,
        }
    }
}

/// A frequency grid seeding a multi-channel demodulator's default channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelGrid {
    pub frequencies_hz: Vec<f64>,
}

impl ChannelGrid {
    /// Default 8-channel RTTY grid, 170 Hz spacing, centered on the
    /// conventional 2125 Hz mark tone.
    pub fn rtty_default() -> Self {
        Self {
            frequencies_hz: vec![
                1275.0, 1445.0, 1615.0, 1785.0, 1955.0, 2125.0, 2295.0, 2465.0,
            ],
        }
    }

    /// Default PSK grid: denser spacing since PSK31/63 occupy far less
    /// bandwidth per channel than RTTY's mark/space pair.
    pub fn psk_default() -> Self {
        Self {
            frequencies_hz: (0..16).map(|i| 1000.0 + i as f64 * 100.0).collect(),
        }
    }
}

/// Configuration for a multi-channel demodulator bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiChannelConfig {
    pub grid: ChannelGrid,
    #[serde(default)]
    pub squelch_level: f32,
    #[serde(default)]
    pub afc_enabled: bool,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for MultiChannelConfig {
    fn default() -> Self {
        Self {
            grid: ChannelGrid::rtty_default(),
            squelch_level: 0.0,
            afc_enabled: false,
            sample_rate: 48_000,
        }
    }
}
