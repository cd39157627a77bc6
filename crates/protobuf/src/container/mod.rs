//! Container backends
//!
//! The codec sees a container as an ordered list of named entries. Writers
//! push entries through an [`EntrySink`]; readers pull them from an
//! [`EntrySource`] in archive order.

mod tar;
mod zip;

pub use self::tar::{TarZstdSink, TarZstdSource};
pub use self::zip::{ZipSink, ZipSource};

use crate::config::ContainerFormat;
use bdio_core::{BdioError, Result, ENTRY_PREFIX_LEN, MAX_CHUNK_SIZE};
use std::io::{Read, Seek, Write};

/// Largest entry a source loads: a full chunk plus its prefix
pub const MAX_ENTRY_SIZE: u64 = MAX_CHUNK_SIZE + ENTRY_PREFIX_LEN as u64;

/// One named entry with its uncompressed bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name within the container
    pub name: String,
    /// Uncompressed entry bytes
    pub data: Vec<u8>,
}

/// Write side of a container
pub trait EntrySink {
    /// Value handed back when the container is finished
    type Output;

    /// Close the current entry, if any, and open a new one
    fn start_entry(&mut self, name: &str) -> Result<()>;

    /// Append bytes to the current entry
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Close the last entry and complete the container
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;
}

/// Sink for a container chosen at runtime
pub enum ContainerSink<W: Write + Seek> {
    /// ZIP archive
    Zip(ZipSink<W>),
    /// zstd-compressed tar archive
    TarZstd(TarZstdSink<W>),
}

impl<W: Write + Seek> ContainerSink<W> {
    /// Open a sink of the given format; `compression_level` applies to zstd
    pub fn new(inner: W, format: ContainerFormat, compression_level: i32) -> Result<Self> {
        Ok(match format {
            ContainerFormat::Zip => ContainerSink::Zip(ZipSink::new(inner)),
            ContainerFormat::TarZstd => {
                ContainerSink::TarZstd(TarZstdSink::new(inner, compression_level)?)
            }
        })
    }

    /// Format being written
    pub fn format(&self) -> ContainerFormat {
        match self {
            ContainerSink::Zip(_) => ContainerFormat::Zip,
            ContainerSink::TarZstd(_) => ContainerFormat::TarZstd,
        }
    }
}

impl<W: Write + Seek> EntrySink for ContainerSink<W> {
    type Output = W;

    fn start_entry(&mut self, name: &str) -> Result<()> {
        match self {
            ContainerSink::Zip(sink) => sink.start_entry(name),
            ContainerSink::TarZstd(sink) => sink.start_entry(name),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            ContainerSink::Zip(sink) => sink.write_bytes(bytes),
            ContainerSink::TarZstd(sink) => sink.write_bytes(bytes),
        }
    }

    fn finish(self) -> Result<W> {
        match self {
            ContainerSink::Zip(sink) => sink.finish(),
            ContainerSink::TarZstd(sink) => sink.finish(),
        }
    }
}

/// Read side of a container
pub trait EntrySource {
    /// Next file entry in archive order, `None` when exhausted
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>>;
}

impl<S: EntrySource + ?Sized> EntrySource for Box<S> {
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        (**self).next_entry()
    }
}

/// Read an entry body, refusing more than `max` bytes
///
/// Sizes declared by the container are not trusted; the bound is enforced on
/// the bytes actually read.
pub(crate) fn read_bounded<R: Read>(name: &str, reader: R, max: u64) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader
        .take(max.saturating_add(1))
        .read_to_end(&mut data)
        .map_err(|e| BdioError::archive(format!("read {}: {}", name, e)))?;
    if data.len() as u64 > max {
        return Err(BdioError::archive(format!(
            "entry {} exceeds {} bytes",
            name, max
        )));
    }
    Ok(data)
}
