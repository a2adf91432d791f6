use crate::{
    destination::Destination, error::Result, flags::Flags, level::Level, logger::Logger,
    sink::Sink,
};
use std::sync::Arc;

pub const LEVEL_KEY: &str = "LVLOG_LEVEL";
pub const PREFIX_KEY: &str = "LVLOG_PREFIX";
pub const FLAGS_KEY: &str = "LVLOG_FLAGS";

/// Settings for a logger built at an application's entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub level: Level,
    pub prefix: String,
    pub flags: Flags,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Error,
            prefix: String::new(),
            flags: Flags::STD,
        }
    }
}

impl Config {
    /// Reads `LVLOG_LEVEL`, `LVLOG_PREFIX` and `LVLOG_FLAGS` from the
    /// process environment. Unset or empty keys keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Config::default();
        if let Some(level) = get_non_empty(LEVEL_KEY) {
            config.level = level.parse()?;
        }
        if let Some(prefix) = get_non_empty(PREFIX_KEY) {
            config.prefix = prefix;
        }
        if let Some(flags) = get_non_empty(FLAGS_KEY) {
            config.flags = flags.parse()?;
        }
        Ok(config)
    }

    /// Builds a logger printing to standard error.
    pub fn build(&self) -> Logger {
        self.build_with(Destination::stderr())
    }

    pub fn build_with(&self, destination: Destination) -> Logger {
        let sink = Sink::new(destination, self.prefix.clone(), self.flags);
        Logger::new(self.level, Arc::new(sink))
    }
}
