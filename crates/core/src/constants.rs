//! Archive-wide constants
//!
//! The writer and the reader take entry names, version tags and the size
//! ceiling from this module only.

use std::fmt;

/// Format version 1: raw messages, File nodes only
pub const VERSION_1: i16 = 1;

/// Format version 2: `Any` envelopes, all node kinds
pub const VERSION_2: i16 = 2;

/// Version written when the caller does not choose one
pub const CURRENT_VERSION: i16 = VERSION_2;

/// Name of the single header entry
pub const HEADER_ENTRY_NAME: &str = "bdio-header.pb";

/// Ceiling on the estimated payload of one chunk entry (16 MiB)
pub const MAX_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Estimated framing overhead per message (the varint length prefix)
///
/// This is an estimate, not the exact varint width, and is part of the
/// wire-compatible budgeting rule: keep it at 4.
pub const MESSAGE_OVERHEAD: u64 = 4;

/// Entry type plus format version, two big-endian i16s
pub const ENTRY_PREFIX_LEN: usize = 4;

/// Name of the `index`-th chunk entry: `bdio-entry-00.pb`, `bdio-entry-01.pb`, ...
pub fn entry_name(index: u32) -> String {
    format!("bdio-entry-{:02}.pb", index)
}

/// Discriminator in the first two bytes of every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum EntryType {
    /// The scan header entry
    Header = 0,
    /// A chunk of node messages
    Chunk = 1,
}

impl EntryType {
    /// Wire value of this entry type
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Map a wire value back to an entry type
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(EntryType::Header),
            1 => Some(EntryType::Chunk),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Header => write!(f, "HEADER"),
            EntryType::Chunk => write!(f, "CHUNK"),
        }
    }
}
