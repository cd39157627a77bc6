//! Chunk size budget
//!
//! Tracks the estimated bytes left in the open chunk entry. The estimate of a
//! message is its serialized length plus [`MESSAGE_OVERHEAD`], which covers
//! its varint delimiter for messages under 256 MiB. The payload of a chunk
//! entry therefore stays below the ceiling.

use bdio_core::{BdioError, Result, MESSAGE_OVERHEAD};

/// Where the next message goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Append to the open entry
    CurrentEntry,
    /// Open a new chunk entry first
    NewEntry,
}

/// Remaining-space accounting for chunk entries
#[derive(Debug, Clone)]
pub struct ChunkBudget {
    max_chunk_size: i64,
    /// 0 means no entry is open yet
    bytes_remaining: i64,
}

impl ChunkBudget {
    /// Budget with the given per-entry ceiling and no entry open
    pub fn new(max_chunk_size: u64) -> Self {
        Self {
            max_chunk_size: i64::try_from(max_chunk_size).unwrap_or(i64::MAX),
            bytes_remaining: 0,
        }
    }

    /// Per-entry ceiling
    pub fn max_chunk_size(&self) -> u64 {
        self.max_chunk_size as u64
    }

    /// Estimated bytes left in the open entry
    pub fn bytes_remaining(&self) -> i64 {
        self.bytes_remaining
    }

    /// Charge a message of `message_len` bytes against the budget
    ///
    /// A message fits while `remaining - (len + 4) > 0`. When it does not,
    /// the budget resets to the ceiling for a new entry. A message that does
    /// not fit an empty entry fails with [`BdioError::MessageTooLarge`] and
    /// leaves the budget unchanged.
    pub fn place(&mut self, message_len: usize) -> Result<Placement> {
        let cost = i64::try_from(message_len)
            .unwrap_or(i64::MAX)
            .saturating_add(MESSAGE_OVERHEAD as i64);

        if self.bytes_remaining.saturating_sub(cost) > 0 {
            self.bytes_remaining -= cost;
            return Ok(Placement::CurrentEntry);
        }

        let fresh = self.max_chunk_size.saturating_sub(cost);
        if fresh <= 0 {
            return Err(BdioError::MessageTooLarge {
                size: message_len as u64,
                overhead: MESSAGE_OVERHEAD,
                max: self.max_chunk_size(),
            });
        }
        self.bytes_remaining = fresh;
        Ok(Placement::NewEntry)
    }
}
