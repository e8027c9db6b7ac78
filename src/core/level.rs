//! Severity levels and output channels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call. Each level picks an output channel and a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    Log,
    #[default]
    Info,
    Success,
    Warn,
    Error,
}

/// One of the four output sinks a logger owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Log,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Log,
        Level::Info,
        Level::Success,
        Level::Warn,
        Level::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Log => "LOG",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Sink this level writes to. Success shares the plain `log` channel.
    pub fn channel(&self) -> Channel {
        match self {
            Level::Log | Level::Success => Channel::Log,
            Level::Info => Channel::Info,
            Level::Warn => Channel::Warn,
            Level::Error => Channel::Error,
        }
    }

    /// Default color, `None` for levels that keep the terminal's own color.
    #[cfg(feature = "console")]
    pub fn color(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            Level::Log | Level::Info => None,
            Level::Success => Some(Green),
            Level::Warn => Some(Yellow),
            Level::Error => Some(Red),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOG" => Ok(Level::Log),
            "INFO" => Ok(Level::Info),
            "SUCCESS" => Ok(Level::Success),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Log, Channel::Info, Channel::Warn, Channel::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            Channel::Log => "log",
            Channel::Info => "info",
            Channel::Warn => "warn",
            Channel::Error => "error",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
