use crate::error::LogError;
use std::{fmt, str::FromStr};

/// Label written ahead of every line after the first in a multi-line message.
pub const CONTINUATION_LABEL: &str = "+  ";

/// Verbosity of a message, ordered from least to most verbose.
///
/// A message at level `L` is emitted by a logger whose threshold is `T`
/// iff `L <= T`. `Error` is the lowest level so it is always emitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    #[default]
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Error, Level::Warn, Level::Info, Level::Debug];

    /// The fixed label prefixed to the first line of a message.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "E: ",
            Level::Warn => "W: ",
            Level::Info => "I: ",
            Level::Debug => "D: ",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Ok(Level::Error),
            "warn" | "warning" | "1" => Ok(Level::Warn),
            "info" | "2" => Ok(Level::Info),
            "debug" | "3" => Ok(Level::Debug),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}
