//! BDIO archive reader
//!
//! Two levels:
//!
//! - Stream functions ([`is_header_entry`], [`read_header`], [`read_chunk`])
//!   decode the bytes of a single entry. `verify_type = false` means the
//!   caller already consumed the entry-type half of the prefix.
//! - [`BdioReader`] walks the entries of a container in archive order and
//!   decodes each one by its prefix.
//!
//! Every decoded node is validated with the validator of the entry's
//! version; the header must carry a non-blank id.

use crate::container::{ArchiveEntry, EntrySource, TarZstdSource, ZipSource};
use crate::framing::{read_entry_type, read_prefix, read_version};
use crate::validator::validate_header;
use crate::version::registry;
use bdio_core::{BdioError, Chunk, EntryType, NodeKind, ProtoScanHeader, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read, Seek};
use tracing::{debug, info};

/// A header together with the format version of its entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedHeader {
    /// Format version of the header entry
    pub version: i16,
    /// Decoded header
    pub header: ProtoScanHeader,
}

/// One decoded archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BdioEntry {
    /// The header entry
    Header {
        /// Entry name in the container
        name: String,
        /// Entry size in bytes, prefix included
        size: usize,
        /// Decoded header
        header: VersionedHeader,
    },
    /// A chunk entry
    Chunk {
        /// Entry name in the container
        name: String,
        /// Entry size in bytes, prefix included
        size: usize,
        /// Format version of the entry
        version: i16,
        /// Decoded nodes
        chunk: Chunk,
    },
}

impl BdioEntry {
    /// Entry name in the container
    pub fn name(&self) -> &str {
        match self {
            BdioEntry::Header { name, .. } | BdioEntry::Chunk { name, .. } => name,
        }
    }

    /// Entry size in bytes, prefix included
    pub fn size(&self) -> usize {
        match self {
            BdioEntry::Header { size, .. } | BdioEntry::Chunk { size, .. } => *size,
        }
    }

    /// Format version of the entry
    pub fn version(&self) -> i16 {
        match self {
            BdioEntry::Header { header, .. } => header.version,
            BdioEntry::Chunk { version, .. } => *version,
        }
    }

    /// Entry type
    pub fn entry_type(&self) -> EntryType {
        match self {
            BdioEntry::Header { .. } => EntryType::Header,
            BdioEntry::Chunk { .. } => EntryType::Chunk,
        }
    }
}

/// Every entry of an archive, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BdioContents {
    /// Format version of the header entry
    pub version: i16,
    /// The scan header
    pub header: ProtoScanHeader,
    /// Chunk entries in archive order
    pub chunks: Vec<Chunk>,
}

impl BdioContents {
    /// Set union of all chunks
    pub fn nodes(&self) -> Chunk {
        Chunk::merge(self.chunks.iter().cloned())
    }

    /// Distinct nodes of one kind across all chunks
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes().count(kind)
    }
}

/// Read the entry-type half of a prefix and report whether it marks a header
///
/// Consumes two bytes. A value other than HEADER, known or not, is `false`;
/// fewer than two bytes is a framing error.
pub fn is_header_entry<R: Read + ?Sized>(reader: &mut R) -> Result<bool> {
    let raw = reader.read_i16::<BigEndian>().map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            BdioError::framing("truncated entry type")
        } else {
            BdioError::Io(e)
        }
    })?;
    Ok(raw == EntryType::Header.as_i16())
}

/// Decode a header entry
pub fn read_header<R: Read>(reader: &mut R, verify_type: bool) -> Result<ProtoScanHeader> {
    read_versioned_header(reader, verify_type).map(|v| v.header)
}

/// Decode a header entry, keeping its format version
pub fn read_versioned_header<R: Read>(
    reader: &mut R,
    verify_type: bool,
) -> Result<VersionedHeader> {
    if verify_type {
        expect_entry_type(reader, EntryType::Header)?;
    }
    let version = read_version(reader)?;
    let header = read_header_body(reader, version)?;
    Ok(VersionedHeader { version, header })
}

/// Decode a chunk entry
pub fn read_chunk<R: Read>(reader: &mut R, verify_type: bool) -> Result<Chunk> {
    if verify_type {
        expect_entry_type(reader, EntryType::Chunk)?;
    }
    let version = read_version(reader)?;
    read_chunk_body(reader, version)
}

/// Scan a container for its header entry and decode it
///
/// Entries are inspected in archive order by their entry-type marker;
/// entries before the header are consumed.
pub fn read_header_from_archive<S: EntrySource + ?Sized>(
    source: &mut S,
) -> Result<ProtoScanHeader> {
    find_header(source).map(|v| v.header)
}

fn find_header<S: EntrySource + ?Sized>(source: &mut S) -> Result<VersionedHeader> {
    while let Some(entry) = source.next_entry()? {
        let mut payload = entry.data.as_slice();
        // Shorter than an entry-type marker: a foreign entry, not a torn one.
        let has_marker = payload.len() >= std::mem::size_of::<i16>();
        if has_marker && is_header_entry(&mut payload)? {
            return read_versioned_header(&mut payload, false);
        }
        debug!(target: "bdio::reader", entry = %entry.name, "Skipping non-header entry");
    }
    Err(BdioError::HeaderNotPresent)
}

fn expect_entry_type<R: Read>(reader: &mut R, expected: EntryType) -> Result<()> {
    let actual = read_entry_type(reader)?;
    if actual != expected {
        return Err(BdioError::UnexpectedEntryType { expected, actual });
    }
    Ok(())
}

fn read_header_body<R: Read>(reader: &mut R, version: i16) -> Result<ProtoScanHeader> {
    let provider = registry().provider(version)?;
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;
    let header = provider.reader().decode_header(&payload)?;
    validate_header(&header)?;
    Ok(header)
}

fn read_chunk_body<R: Read>(reader: &mut R, version: i16) -> Result<Chunk> {
    let provider = registry().provider(version)?;
    provider.reader().read_chunk(reader, provider.validator())
}

/// Reads the entries of a BDIO archive from an [`EntrySource`]
///
/// Forward-only: entries consumed by one call are not seen by the next.
pub struct BdioReader<S: EntrySource> {
    source: S,
}

impl<R: Read + Seek> BdioReader<ZipSource<R>> {
    /// Reader over a ZIP archive
    pub fn zip(inner: R) -> Result<Self> {
        Ok(Self::new(ZipSource::new(inner)?))
    }
}

impl BdioReader<TarZstdSource> {
    /// Reader over a zstd-compressed tar archive
    pub fn tar_zstd<R: Read>(inner: R) -> Result<Self> {
        Ok(Self::new(TarZstdSource::new(inner)?))
    }
}

impl<S: EntrySource> BdioReader<S> {
    /// Reader over an already-open source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Skip to the header entry and decode it
    pub fn read_header(&mut self) -> Result<VersionedHeader> {
        find_header(&mut self.source)
    }

    /// Decode the next entry, `None` when the archive is exhausted
    pub fn next_entry(&mut self) -> Result<Option<BdioEntry>> {
        match self.source.next_entry()? {
            Some(entry) => decode_entry(entry).map(Some),
            None => Ok(None),
        }
    }

    /// Decode every remaining entry
    ///
    /// Fails if the archive holds no header entry or more than one.
    pub fn read_all(mut self) -> Result<BdioContents> {
        let mut header: Option<VersionedHeader> = None;
        let mut chunks = Vec::new();

        while let Some(entry) = self.next_entry()? {
            match entry {
                BdioEntry::Header {
                    name,
                    header: decoded,
                    ..
                } => {
                    if header.is_some() {
                        return Err(BdioError::DuplicateHeader(name));
                    }
                    header = Some(decoded);
                }
                BdioEntry::Chunk { chunk, .. } => chunks.push(chunk),
            }
        }

        let header = header.ok_or(BdioError::HeaderNotPresent)?;
        info!(
            target: "bdio::reader",
            version = header.version,
            chunk_entries = chunks.len(),
            "Read archive"
        );
        Ok(BdioContents {
            version: header.version,
            header: header.header,
            chunks,
        })
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }
}

fn decode_entry(entry: ArchiveEntry) -> Result<BdioEntry> {
    let size = entry.data.len();
    let mut payload = entry.data.as_slice();
    let prefix = read_prefix(&mut payload)?;
    debug!(
        target: "bdio::reader",
        entry = %entry.name,
        entry_type = %prefix.entry_type,
        version = prefix.version,
        size,
        "Decoding entry"
    );

    match prefix.entry_type {
        EntryType::Header => {
            let header = read_header_body(&mut payload, prefix.version)?;
            Ok(BdioEntry::Header {
                name: entry.name,
                size,
                header: VersionedHeader {
                    version: prefix.version,
                    header,
                },
            })
        }
        EntryType::Chunk => {
            let chunk = read_chunk_body(&mut payload, prefix.version)?;
            Ok(BdioEntry::Chunk {
                name: entry.name,
                size,
                version: prefix.version,
                chunk,
            })
        }
    }
}
