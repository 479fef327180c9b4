//! Configuration types for parsing and output.
//!
//! These are plain builder structs with no CLI framework dependency.
//!
//! # Example
//!
//! ```rust
//! use chatscope::config::ParserConfig;
//! use chatscope::parser::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_streaming(true)
//!     .with_skip_system(true);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for transcript loading.
///
/// Entry assembly is never affected by these settings. `skip_system` only
/// filters the assembled sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Read the file line by line instead of all at once (default: false)
    pub streaming: bool,

    /// Read buffer size for streaming (default: 64KB)
    pub buffer_size: usize,

    /// Drop system entries after assembly (default: false)
    pub skip_system: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            streaming: false,
            buffer_size: 64 * 1024,
            skip_system: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a streaming-optimized configuration.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            buffer_size: 256 * 1024,
            ..Self::default()
        }
    }

    /// Enables or disables streaming mode.
    #[must_use]
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled;
        self
    }

    /// Sets the buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether to drop system entries.
    #[must_use]
    pub fn with_skip_system(mut self, skip: bool) -> Self {
        self.skip_system = skip;
        self
    }
}

/// Configuration for serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON array (default: false)
    pub pretty: bool,

    /// Emit subtype, status and attachment fields (default: true)
    pub include_facts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_facts: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_facts(mut self, include: bool) -> Self {
        self.include_facts = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert!(!config.streaming);
        assert_eq!(config.buffer_size, 64 * 1024);
        assert!(!config.skip_system);
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .with_streaming(true)
            .with_buffer_size(128 * 1024)
            .with_skip_system(true);

        assert!(config.streaming);
        assert_eq!(config.buffer_size, 128 * 1024);
        assert!(config.skip_system);
    }

    #[test]
    fn test_parser_config_streaming() {
        let config = ParserConfig::streaming();
        assert!(config.streaming);
        assert_eq!(config.buffer_size, 256 * 1024);
        assert!(!config.skip_system);
    }

    #[test]
    fn test_output_config() {
        let config = OutputConfig::default();
        assert!(!config.pretty);
        assert!(config.include_facts);

        let config = OutputConfig::new().with_pretty(true).with_facts(false);
        assert!(config.pretty);
        assert!(!config.include_facts);
    }
}
