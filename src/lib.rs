//! BDIO - chunked protobuf archives for bill-of-materials graphs
//!
//! A BDIO archive holds one scan header and any number of typed graph nodes
//! (files, components, dependencies, containers, ...) split into
//! size-bounded entries of a ZIP or tar+zstd container.
//!
//! # Quick Start
//!
//! ```ignore
//! use bdio::{BdioReader, BdioWriter, ProtoScanHeader, ScanType, WriterConfig};
//!
//! let mut writer = BdioWriter::zip(std::fs::File::create("scan.bdio")?, WriterConfig::default())?;
//! writer.write_header(&ProtoScanHeader::new_random(ScanType::Signature))?;
//! writer.write_nodes(file_nodes)?;
//! writer.close()?;
//!
//! let contents = BdioReader::zip(std::fs::File::open("scan.bdio")?)?.read_all()?;
//! ```
//!
//! # Architecture
//!
//! Message types, errors and chunk collections live in `bdio-core`; framing,
//! version dispatch, validation and the container backends live in
//! `bdio-protobuf`. Both are re-exported here.

pub use bdio_core::*;
pub use bdio_protobuf::*;
