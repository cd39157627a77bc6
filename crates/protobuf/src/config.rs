//! Writer configuration.
//!
//! The defaults produce archives any BDIO consumer can read: format version
//! 2, 16 MiB chunk entries, ZIP container.

use crate::version::registry;
use bdio_core::{BdioError, CURRENT_VERSION, MAX_CHUNK_SIZE, MESSAGE_OVERHEAD};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Container that holds the archive entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerFormat {
    /// ZIP archive (default)
    #[default]
    Zip,
    /// zstd-compressed tar archive
    TarZstd,
}

impl ContainerFormat {
    /// Guess the container from the first bytes of an archive
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        const ZIP_MAGIC: [&[u8]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];
        const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

        if ZIP_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
            Some(ContainerFormat::Zip)
        } else if bytes.starts_with(ZSTD_MAGIC) {
            Some(ContainerFormat::TarZstd)
        } else {
            None
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerFormat::Zip => write!(f, "zip"),
            ContainerFormat::TarZstd => write!(f, "tar-zstd"),
        }
    }
}

impl FromStr for ContainerFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zip" => Ok(ContainerFormat::Zip),
            "tar-zstd" | "tar.zst" => Ok(ContainerFormat::TarZstd),
            other => Err(ConfigError::UnknownContainer(other.to_string())),
        }
    }
}

/// Writer configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Format version to write (default: 2).
    pub version: i16,

    /// Ceiling on the estimated payload of one chunk entry (default: 16MB).
    ///
    /// May be lowered, never raised above the format's 16MB limit.
    pub max_chunk_size: u64,

    /// Container format (default: zip).
    pub container: ContainerFormat,

    /// zstd level for the tar-zstd container (default: 3).
    pub compression_level: i32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            version: CURRENT_VERSION,
            max_chunk_size: MAX_CHUNK_SIZE,
            container: ContainerFormat::Zip,
            compression_level: 3,
        }
    }
}

impl WriterConfig {
    /// Create a new writer configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set format version (builder pattern).
    pub fn with_version(mut self, version: i16) -> Self {
        self.version = version;
        self
    }

    /// Set maximum chunk size (builder pattern).
    pub fn with_max_chunk_size(mut self, size: u64) -> Self {
        self.max_chunk_size = size;
        self
    }

    /// Set container format (builder pattern).
    pub fn with_container(mut self, container: ContainerFormat) -> Self {
        self.container = container;
        self
    }

    /// Set zstd compression level (builder pattern).
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if registry().provider(self.version).is_err() {
            return Err(ConfigError::UnknownVersion(self.version));
        }
        if self.max_chunk_size <= MESSAGE_OVERHEAD {
            return Err(ConfigError::ChunkSizeTooSmall(self.max_chunk_size));
        }
        if self.max_chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge(self.max_chunk_size));
        }
        if !(1..=22).contains(&self.compression_level) {
            return Err(ConfigError::CompressionLevel(self.compression_level));
        }
        Ok(())
    }

    /// Check that a writer for `format` matches the configured container.
    pub fn expect_container(&self, format: ContainerFormat) -> Result<(), ConfigError> {
        if self.container != format {
            return Err(ConfigError::ContainerMismatch {
                configured: self.container,
                requested: format,
            });
        }
        Ok(())
    }

    /// Create a configuration for testing (4KB chunks for fast rollover).
    pub fn for_testing() -> Self {
        WriterConfig {
            max_chunk_size: 4 * 1024,
            ..Self::default()
        }
    }
}

/// Writer configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No version provider is registered for the version.
    #[error("Unknown format version: {0}")]
    UnknownVersion(i16),

    /// Chunk size leaves no room for a message.
    #[error("Chunk size {0} must exceed the per-message overhead")]
    ChunkSizeTooSmall(u64),

    /// Chunk size above the format limit.
    #[error("Chunk size {0} exceeds the 16MB format limit")]
    ChunkSizeTooLarge(u64),

    /// zstd level outside 1..=22.
    #[error("Compression level {0} outside 1..=22")]
    CompressionLevel(i32),

    /// Unrecognized container name.
    #[error("Unknown container format: {0}")]
    UnknownContainer(String),

    /// Writer constructor disagrees with the configured container.
    #[error("Configured container is {configured}, writer requested {requested}")]
    ContainerMismatch {
        /// `WriterConfig::container`
        configured: ContainerFormat,
        /// Container of the constructor called
        requested: ContainerFormat,
    },
}

impl From<ConfigError> for BdioError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownVersion(version) => BdioError::UnknownVersion(version),
            other => BdioError::Config(other.to_string()),
        }
    }
}
