//! Core types for the BDIO protobuf archive codec
//!
//! This crate defines the foundational types shared by the writer and reader:
//! - Constants: entry names, format versions, chunk size ceiling
//! - Messages: the scan header and the seven node messages (prost)
//! - Node / NodeKind: closed tagged union over the node messages
//! - Chunk / ChunkBuilder: de-duplicating per-kind node sets
//! - SignatureType: wire keys of `ProtoFileNode.signatures`
//! - Error: error taxonomy (framing, validation, protocol, capacity, state)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod constants;
pub mod error;
pub mod header;
#[allow(missing_docs)]
pub mod messages;
pub mod node;
pub mod signature;
pub mod time;

pub use chunk::{Chunk, ChunkBuilder};
pub use constants::{
    entry_name, EntryType, CURRENT_VERSION, ENTRY_PREFIX_LEN, HEADER_ENTRY_NAME, MAX_CHUNK_SIZE,
    MESSAGE_OVERHEAD, VERSION_1, VERSION_2,
};
pub use error::{BdioError, ErrorKind, FieldRule, Result, ValidationError};
pub use messages::{
    BdbaMatchType, ProtoAnnotationNode, ProtoBdbaFileNode, ProtoComponentNode,
    ProtoContainerLayerNode, ProtoContainerNode, ProtoDependencyNode, ProtoFileNode,
    ProtoScanHeader, ScanType, PROTO_PACKAGE, TYPE_URL_PREFIX,
};
pub use node::{Node, NodeKind};
pub use signature::SignatureType;
