//! A channel's stable identity and current (possibly AFC-tracked) frequency.

use crate::domain::ChannelId;

/// Identity is stable for the channel's lifetime; `frequency_hz` is mutable
/// (AFC retunes it) but the id never changes, so callers can keep tracking
/// "the fourth speaker" across a retune.
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    pub id: ChannelId,
    pub frequency_hz: f64,
}
