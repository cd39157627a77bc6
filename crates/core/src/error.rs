//! Error types for the BDIO codec
//!
//! Every failure is fatal for the call that raised it; nothing is retried
//! internally. [`BdioError::kind`] classifies an error into the taxonomy
//! callers branch on: framing, validation, protocol, capacity, state, I/O and
//! container (archive) errors.

use crate::constants::EntryType;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for BDIO operations
pub type Result<T> = std::result::Result<T, BdioError>;

/// Coarse classification of a [`BdioError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Truncated or malformed entry prefix or message framing
    Framing,
    /// A message is missing a required field
    Validation,
    /// Unknown entry type, version or message type, or a missing header
    Protocol,
    /// A single message does not fit in an empty chunk entry
    Capacity,
    /// Writer methods called out of order
    State,
    /// Failure of the underlying stream
    Io,
    /// Failure of the container (zip or tar/zstd) layer
    Archive,
    /// Rejected writer or reader configuration
    Config,
}

/// Error types for BDIO archive operations
#[derive(Debug, Error)]
pub enum BdioError {
    /// Entry prefix or delimited message cut short or malformed
    #[error("Framing error: {0}")]
    Framing(String),

    /// A node or header failed its field contract
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Protobuf payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Protobuf payload could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    /// No reader, writer or validator is registered for this version
    #[error("Unknown version: {0}")]
    UnknownVersion(i16),

    /// Entry type field holds a value other than HEADER or CHUNK
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(i16),

    /// Entry type field holds the other known entry type
    #[error("Unexpected entry type: expected {expected}, found {actual}")]
    UnexpectedEntryType {
        /// Entry type the caller asked for
        expected: EntryType,
        /// Entry type found in the prefix
        actual: EntryType,
    },

    /// Envelope type does not name the scan header
    #[error("Unknown header type: {0}")]
    UnknownHeaderType(String),

    /// Envelope type is not a node kind of the entry's version
    #[error("Object of unknown class found: {0}")]
    UnknownMessageType(String),

    /// The archive holds no header entry
    #[error("Header file not present")]
    HeaderNotPresent,

    /// The archive holds more than one header entry
    #[error("Duplicate header entry: {0}")]
    DuplicateHeader(String),

    /// A single message exceeds the chunk ceiling on its own
    #[error("Message larger than maximum allowed chunk size: {size} bytes (+{overhead} overhead) exceeds {max}")]
    MessageTooLarge {
        /// Serialized size of the message
        size: u64,
        /// Estimated framing overhead added to the size
        overhead: u64,
        /// Maximum chunk size in effect
        max: u64,
    },

    /// `write_header` was called a second time
    #[error("Header already written")]
    HeaderAlreadyWritten,

    /// A node was written or the archive closed before the header
    #[error("Header not written: {0}")]
    HeaderNotWritten(&'static str),

    /// Container layer failure
    #[error("Archive error: {0}")]
    Archive(String),

    /// Compression/decompression failure
    #[error("Compression error: {0}")]
    Compression(String),

    /// Writer configuration rejected
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BdioError {
    /// Create a framing error
    pub fn framing(msg: impl Into<String>) -> Self {
        Self::Framing(msg.into())
    }

    /// Create an archive error
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Create a compression error
    pub fn compression(msg: impl Into<String>) -> Self {
        Self::Compression(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BdioError::Framing(_) | BdioError::Decode(_) | BdioError::Encode(_) => {
                ErrorKind::Framing
            }
            BdioError::Validation(_) => ErrorKind::Validation,
            BdioError::UnknownVersion(_)
            | BdioError::UnknownEntryType(_)
            | BdioError::UnexpectedEntryType { .. }
            | BdioError::UnknownHeaderType(_)
            | BdioError::UnknownMessageType(_)
            | BdioError::HeaderNotPresent
            | BdioError::DuplicateHeader(_) => ErrorKind::Protocol,
            BdioError::MessageTooLarge { .. } => ErrorKind::Capacity,
            BdioError::HeaderAlreadyWritten | BdioError::HeaderNotWritten(_) => ErrorKind::State,
            BdioError::Archive(_) | BdioError::Compression(_) => ErrorKind::Archive,
            BdioError::Config(_) => ErrorKind::Config,
            BdioError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Presence rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRule {
    /// String must not be empty
    NonEmpty,
    /// String must hold a non-whitespace character
    NonBlank,
    /// Repeated field must hold at least one element
    NonEmptyList,
    /// Message field must be set
    Present,
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::NonEmpty => write!(f, "must not be empty"),
            FieldRule::NonBlank => write!(f, "must not be blank"),
            FieldRule::NonEmptyList => write!(f, "must not be an empty list"),
            FieldRule::Present => write!(f, "must be present"),
        }
    }
}

/// A message that breaks its field contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing
    #[error("The field {message}.{field} {rule}: {value:?}")]
    Field {
        /// Protobuf message name, e.g. `ProtoFileNode`
        message: &'static str,
        /// Field name as declared in the message
        field: &'static str,
        /// Rule the field broke
        rule: FieldRule,
        /// Offending value, rendered
        value: String,
    },

    /// The node kind is not legal in this format version
    #[error("Unknown message type in version {version}: {message}")]
    UnsupportedType {
        /// Format version of the validator
        version: i16,
        /// Protobuf message name of the rejected node
        message: &'static str,
    },

    /// A signature name or ordinal outside the signature table
    #[error("Unknown signature type: {0}")]
    UnknownSignatureType(String),
}

impl ValidationError {
    /// Protobuf message name the error is about
    pub fn message_name(&self) -> &'static str {
        match self {
            ValidationError::Field { message, .. } => *message,
            ValidationError::UnsupportedType { message, .. } => *message,
            ValidationError::UnknownSignatureType(_) => "ProtoFileNode",
        }
    }

    /// Field that failed, if the error is about a field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Field { field, .. } => Some(*field),
            ValidationError::UnsupportedType { .. } => None,
            ValidationError::UnknownSignatureType(_) => Some("signatures"),
        }
    }
}
