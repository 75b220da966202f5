//! Graph configuration
//!
//! Settings that used to be process-wide switches (literal validation mode)
//! travel with the graph instead, so two graphs in one process can be
//! configured differently.

use crate::reifier::ReificationStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Literal construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralConfig {
    /// Reject ill-formed typed literals when they are created instead of
    /// when their value is first asked for
    pub eager_validation: bool,
}

impl LiteralConfig {
    /// Validate lexical forms at construction
    pub fn eager() -> Self {
        Self { eager_validation: true }
    }

    /// Defer validation until value extraction
    pub fn lazy() -> Self {
        Self { eager_validation: false }
    }
}

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Reification style of the graph's reifier
    pub style: ReificationStyle,
    /// Whether begin/commit/abort are available
    pub transactions: bool,
    /// Literal settings
    pub literals: LiteralConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            style: ReificationStyle::Minimal,
            transactions: true,
            literals: LiteralConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the given reification style
    pub fn with_style(style: ReificationStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Enable or disable transaction support
    pub fn transactions(mut self, enabled: bool) -> Self {
        self.transactions = enabled;
        self
    }

    /// Replace the literal settings
    pub fn literals(mut self, literals: LiteralConfig) -> Self {
        self.literals = literals;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Render the configuration as JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
