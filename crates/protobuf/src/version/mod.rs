//! Version dispatch
//!
//! A format version is a reader, a writer, a validator and the ordered table
//! of node kinds legal in its chunks. The process-wide [`registry`] is built
//! once on first use and is read-only afterwards.
//!
//! Adding a version means adding a module with its three parts and kind
//! table, then registering it in [`VersionRegistry::builtin`]. Existing
//! versions are never replaced.

mod v1;
mod v2;

pub use v1::{V1Reader, V1Writer, V1_NODE_KINDS};
pub use v2::{V2Reader, V2Writer, V2_NODE_KINDS};

use crate::validator::{NodeValidator, V1Validator, V2Validator};
use bdio_core::{
    BdioError, Chunk, ChunkBuilder, Node, NodeKind, ProtoScanHeader, Result, VERSION_1, VERSION_2,
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::trace;

/// Encodes header and node payloads for one format version
pub trait VersionWriter: Send + Sync {
    /// Format version written
    fn version(&self) -> i16;

    /// Header entry payload, without the entry prefix
    fn encode_header(&self, header: &ProtoScanHeader) -> Result<Vec<u8>>;

    /// One length-delimited chunk message
    fn encode_node(&self, node: &Node) -> Result<Vec<u8>>;
}

/// Decodes header and chunk payloads for one format version
pub trait VersionReader: Send + Sync {
    /// Format version read
    fn version(&self) -> i16;

    /// Decode a header entry payload (everything after the prefix)
    fn decode_header(&self, payload: &[u8]) -> Result<ProtoScanHeader>;

    /// Read the next delimited node, `None` at a clean end of entry
    fn read_node(&self, reader: &mut dyn Read) -> Result<Option<Node>>;

    /// Read the rest of a chunk entry, validating every node
    fn read_chunk(&self, reader: &mut dyn Read, validator: &dyn NodeValidator) -> Result<Chunk> {
        let mut builder = ChunkBuilder::new();
        let mut count = 0usize;
        while let Some(node) = self.read_node(reader)? {
            validator.validate(&node)?;
            trace!(target: "bdio::reader", kind = %node.kind(), "Decoded node");
            builder.add(node);
            count += 1;
        }
        trace!(target: "bdio::reader", version = self.version(), count, "Chunk exhausted");
        Ok(builder.build())
    }
}

/// Everything that implements one format version
pub struct VersionProvider {
    version: i16,
    node_kinds: &'static [NodeKind],
    reader: Box<dyn VersionReader>,
    writer: Box<dyn VersionWriter>,
    validator: Box<dyn NodeValidator>,
}

impl VersionProvider {
    /// Bundle the parts of a version
    pub fn new(
        version: i16,
        node_kinds: &'static [NodeKind],
        reader: Box<dyn VersionReader>,
        writer: Box<dyn VersionWriter>,
        validator: Box<dyn NodeValidator>,
    ) -> Self {
        Self {
            version,
            node_kinds,
            reader,
            writer,
            validator,
        }
    }

    /// Format version
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Node kinds legal in this version's chunks, in registry order
    pub fn node_kinds(&self) -> &'static [NodeKind] {
        self.node_kinds
    }

    /// Whether `kind` may appear in this version's chunks
    pub fn supports(&self, kind: NodeKind) -> bool {
        self.node_kinds.contains(&kind)
    }

    /// Reader for this version
    pub fn reader(&self) -> &dyn VersionReader {
        self.reader.as_ref()
    }

    /// Writer for this version
    pub fn writer(&self) -> &dyn VersionWriter {
        self.writer.as_ref()
    }

    /// Validator for this version
    pub fn validator(&self) -> &dyn NodeValidator {
        self.validator.as_ref()
    }
}

impl std::fmt::Debug for VersionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionProvider")
            .field("version", &self.version)
            .field("node_kinds", &self.node_kinds)
            .finish()
    }
}

/// Map from format version to its provider
#[derive(Debug, Default)]
pub struct VersionRegistry {
    providers: BTreeMap<i16, VersionProvider>,
}

impl VersionRegistry {
    /// Registry holding versions 1 and 2
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(VersionProvider::new(
            VERSION_1,
            V1_NODE_KINDS,
            Box::new(V1Reader),
            Box::new(V1Writer),
            Box::new(V1Validator),
        ));
        registry.register(VersionProvider::new(
            VERSION_2,
            V2_NODE_KINDS,
            Box::new(V2Reader),
            Box::new(V2Writer),
            Box::new(V2Validator),
        ));
        registry
    }

    /// Add a version; returns false and keeps the existing provider if the
    /// version is already registered
    pub fn register(&mut self, provider: VersionProvider) -> bool {
        if self.providers.contains_key(&provider.version) {
            return false;
        }
        self.providers.insert(provider.version, provider);
        true
    }

    /// Provider of a version
    pub fn provider(&self, version: i16) -> Result<&VersionProvider> {
        self.providers
            .get(&version)
            .ok_or(BdioError::UnknownVersion(version))
    }

    /// Reader of a version
    pub fn get_reader(&self, version: i16) -> Result<&dyn VersionReader> {
        self.provider(version).map(VersionProvider::reader)
    }

    /// Writer of a version
    pub fn get_writer(&self, version: i16) -> Result<&dyn VersionWriter> {
        self.provider(version).map(VersionProvider::writer)
    }

    /// Validator of a version
    pub fn get_validator(&self, version: i16) -> Result<&dyn NodeValidator> {
        self.provider(version).map(VersionProvider::validator)
    }

    /// Registered versions, ascending
    pub fn versions(&self) -> impl Iterator<Item = i16> + '_ {
        self.providers.keys().copied()
    }
}

static REGISTRY: Lazy<VersionRegistry> = Lazy::new(VersionRegistry::builtin);

/// The process-wide version registry
pub fn registry() -> &'static VersionRegistry {
    &REGISTRY
}
