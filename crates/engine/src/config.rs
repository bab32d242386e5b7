//! Engine configuration from environment variables.

use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::types::TICK_MS;

/// Default command queue depth
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Gravity period while playing
    pub tick_period: Duration,
    /// Piece RNG seed; None derives one from the wall clock
    pub seed: Option<u32>,
    /// Bounded command queue depth
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(TICK_MS as u64),
            seed: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Read `BLOCKTRIS_TICK_MS`, `BLOCKTRIS_SEED` and `BLOCKTRIS_QUEUE`.
    ///
    /// Missing variables use defaults; unparsable or zero values are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_ms = parse_positive::<u64>(&lookup, "BLOCKTRIS_TICK_MS");
        let seed = parse_positive::<u32>(&lookup, "BLOCKTRIS_SEED");
        let queue_capacity = parse_positive::<usize>(&lookup, "BLOCKTRIS_QUEUE");

        Self {
            tick_period: tick_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_period),
            seed,
            queue_capacity: queue_capacity.unwrap_or(defaults.queue_capacity),
        }
    }

    /// Configured seed, or one derived from the current time.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let raw = lookup(key)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(v) if v != T::default() => Some(v),
        _ => {
            warn!(key, value = trimmed, "ignoring invalid configuration value");
            None
        }
    }
}
