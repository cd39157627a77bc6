//! Protobuf codec for chunked BDIO archives
//!
//! An archive is a container (ZIP by default, tar+zstd optionally) of named
//! entries. Every entry starts with a 4-byte prefix:
//!
//! ```text
//! +----------------+-------------------+---------------------------------+
//! | entry_type i16 | format_version i16| payload                         |
//! | 0=HEADER 1=CHUNK (big-endian)      | v1: raw / v2: Any envelopes     |
//! +----------------+-------------------+---------------------------------+
//!
//! bdio-header.pb     prefix + header message (no length prefix)
//! bdio-entry-00.pb   prefix + varint-delimited node messages
//! bdio-entry-01.pb   ...
//! ```
//!
//! Chunk entries roll over when the estimated payload (`Σ(len + 4)`) would
//! reach the maximum chunk size. A node that cannot fit in an empty entry is
//! a capacity error; nodes are never split.
//!
//! # Example
//!
//! ```no_run
//! use bdio_core::{ProtoFileNode, ProtoScanHeader, ScanType};
//! use bdio_protobuf::{BdioReader, BdioWriter, WriterConfig};
//! use std::io::Cursor;
//!
//! # fn main() -> bdio_core::Result<()> {
//! let mut writer = BdioWriter::zip(Cursor::new(Vec::new()), WriterConfig::default())?;
//! writer.write_header(&ProtoScanHeader::new("scan-1", ScanType::Signature))?;
//! writer.write_node(ProtoFileNode {
//!     id: 1,
//!     name: "a.txt".to_string(),
//!     path: "./a.txt".to_string(),
//!     uri: "file:///a.txt".to_string(),
//!     file_system_type: "REGULAR".to_string(),
//!     size: 10,
//!     ..Default::default()
//! })?;
//! let archive = writer.close()?.into_inner();
//!
//! let contents = BdioReader::zip(Cursor::new(archive))?.read_all()?;
//! assert_eq!(contents.nodes().file_nodes().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod budget;
pub mod config;
pub mod container;
pub mod envelope;
pub mod framing;
pub mod reader;
pub mod validator;
pub mod version;
pub mod writer;

pub use budget::{ChunkBudget, Placement};
pub use config::{ConfigError, ContainerFormat, WriterConfig};
pub use container::{
    ArchiveEntry, ContainerSink, EntrySink, EntrySource, TarZstdSink, TarZstdSource, ZipSink,
    ZipSource, MAX_ENTRY_SIZE,
};
pub use framing::{read_prefix, write_prefix, EntryPrefix};
pub use reader::{
    is_header_entry, read_chunk, read_header, read_header_from_archive, read_versioned_header,
    BdioContents, BdioEntry, BdioReader, VersionedHeader,
};
pub use validator::{validate_header, NodeValidator, V1Validator, V2Validator};
pub use version::{registry, VersionProvider, VersionReader, VersionRegistry, VersionWriter};
pub use writer::BdioWriter;
