//! Runtime configuration.
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! then `PRACTICE_*` environment variables. CLI flags are applied on top by
//! the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result, DEFAULT_EVENT_BUFFER, DEFAULT_TICK_INTERVAL_MS};

/// Environment variable prefix (`PRACTICE_ADDR`, `PRACTICE_TICK_INTERVAL_MS`, ...)
pub const ENV_PREFIX: &str = "PRACTICE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    /// API bind address
    pub addr: String,

    /// Period between ticks (milliseconds). One tick advances a session by one second.
    pub tick_interval_ms: u64,

    /// Capacity of each session's live event channel
    pub event_buffer: usize,

    /// Initial sound toggle for new sessions
    pub sound_enabled: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            event_buffer: DEFAULT_EVENT_BUFFER,
            sound_enabled: true,
            log_filter: "practice_engine=info,practice=info".to_string(),
        }
    }
}

impl PracticeConfig {
    /// Load `path` (if given), then the environment. Missing keys fall back
    /// to [`PracticeConfig::default`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(Error::InvalidConfig(
                "event_buffer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
