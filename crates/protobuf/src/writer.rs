//! BDIO archive writer
//!
//! Accepts one header followed by any number of nodes and frames them into
//! container entries:
//!
//! ```text
//! write_header  ->  bdio-header.pb     [HEADER][version][header payload]
//! write_node    ->  bdio-entry-00.pb   [CHUNK][version][len|node][len|node]...
//!                   bdio-entry-01.pb   opened when the budget is exhausted
//! close         ->  container finished
//! ```
//!
//! Every node is validated before any of its bytes reach the container. A
//! failed call leaves the archive with the nodes written before it; nothing
//! is rolled back.

use crate::budget::{ChunkBudget, Placement};
use crate::config::{ContainerFormat, WriterConfig};
use crate::container::{ContainerSink, EntrySink, TarZstdSink, ZipSink};
use crate::framing::write_prefix;
use crate::validator::validate_header;
use crate::version::{registry, VersionProvider};
use bdio_core::{
    entry_name, BdioError, EntryType, Node, ProtoScanHeader, Result, HEADER_ENTRY_NAME,
};
use std::io::{Seek, Write};
use tracing::{debug, info, trace};

/// Writes a BDIO archive into an [`EntrySink`]
///
/// Not synchronized: one writer per archive, driven from one thread.
pub struct BdioWriter<S: EntrySink> {
    sink: S,
    provider: &'static VersionProvider,
    budget: ChunkBudget,
    entry_count: u32,
    nodes_written: u64,
    header_written: bool,
}

impl<W: Write + Seek> BdioWriter<ContainerSink<W>> {
    /// Writer producing the container named by `config.container`
    pub fn create(inner: W, config: WriterConfig) -> Result<Self> {
        config.validate()?;
        let sink = ContainerSink::new(inner, config.container, config.compression_level)?;
        Self::new(sink, config)
    }
}

impl<W: Write + Seek> BdioWriter<ZipSink<W>> {
    /// Writer producing a ZIP archive; `config.container` must be zip
    pub fn zip(inner: W, config: WriterConfig) -> Result<Self> {
        config.expect_container(ContainerFormat::Zip)?;
        Self::new(ZipSink::new(inner), config)
    }
}

impl<W: Write> BdioWriter<TarZstdSink<W>> {
    /// Writer producing a zstd-compressed tar archive; `config.container`
    /// must be tar-zstd
    pub fn tar_zstd(inner: W, config: WriterConfig) -> Result<Self> {
        config.expect_container(ContainerFormat::TarZstd)?;
        config.validate()?;
        let sink = TarZstdSink::new(inner, config.compression_level)?;
        Self::new(sink, config)
    }
}

impl<S: EntrySink> BdioWriter<S> {
    /// Create a writer over an already-open sink
    ///
    /// `config.container` is not consulted; the sink decides the container.
    pub fn new(sink: S, config: WriterConfig) -> Result<Self> {
        config.validate()?;
        let provider = registry().provider(config.version)?;
        Ok(Self {
            sink,
            provider,
            budget: ChunkBudget::new(config.max_chunk_size),
            entry_count: 0,
            nodes_written: 0,
            header_written: false,
        })
    }

    /// Format version being written
    pub fn version(&self) -> i16 {
        self.provider.version()
    }

    /// Chunk entries opened so far
    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    /// Nodes written so far
    pub fn nodes_written(&self) -> u64 {
        self.nodes_written
    }

    /// Whether the header has been written
    pub fn is_header_written(&self) -> bool {
        self.header_written
    }

    /// Write the header entry; allowed exactly once, before any node
    pub fn write_header(&mut self, header: &ProtoScanHeader) -> Result<()> {
        if self.header_written {
            return Err(BdioError::HeaderAlreadyWritten);
        }
        validate_header(header)?;
        let payload = self.provider.writer().encode_header(header)?;

        self.sink.start_entry(HEADER_ENTRY_NAME)?;
        self.sink
            .write_bytes(&write_prefix(EntryType::Header, self.version()))?;
        self.sink.write_bytes(&payload)?;
        self.header_written = true;

        debug!(
            target: "bdio::writer",
            version = self.version(),
            header_id = %header.id,
            bytes = payload.len(),
            "Wrote header entry"
        );
        Ok(())
    }

    /// Validate and write one node, opening a new chunk entry when needed
    pub fn write_node(&mut self, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        if !self.header_written {
            return Err(BdioError::HeaderNotWritten("write_node"));
        }
        self.provider.validator().validate(&node)?;
        if !self.provider.supports(node.kind()) {
            return Err(BdioError::UnknownMessageType(node.kind().type_url()));
        }

        let payload = self.provider.writer().encode_node(&node)?;
        // Charge what is written: the raw node in v1, its envelope in v2.
        let message_len = prost::decode_length_delimiter(payload.as_slice())?;
        if self.budget.place(message_len)? == Placement::NewEntry {
            self.open_chunk_entry()?;
        }
        self.sink.write_bytes(&payload)?;
        self.nodes_written += 1;

        trace!(
            target: "bdio::writer",
            kind = %node.kind(),
            bytes = payload.len(),
            remaining = self.budget.bytes_remaining(),
            "Wrote node"
        );
        Ok(())
    }

    /// Write nodes in iteration order, stopping at the first failure
    pub fn write_nodes<I, N>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        for node in nodes {
            self.write_node(node)?;
        }
        Ok(())
    }

    /// Finish the container and hand back its output
    ///
    /// Consumes the writer, so an archive cannot be closed twice.
    pub fn close(self) -> Result<S::Output> {
        if !self.header_written {
            return Err(BdioError::HeaderNotWritten("close"));
        }
        let output = self.sink.finish()?;
        info!(
            target: "bdio::writer",
            version = self.provider.version(),
            chunk_entries = self.entry_count,
            nodes = self.nodes_written,
            "Closed archive"
        );
        Ok(output)
    }

    fn open_chunk_entry(&mut self) -> Result<()> {
        let name = entry_name(self.entry_count);
        self.sink.start_entry(&name)?;
        self.sink
            .write_bytes(&write_prefix(EntryType::Chunk, self.version()))?;
        self.entry_count += 1;
        debug!(target: "bdio::writer", entry = %name, "Opened chunk entry");
        Ok(())
    }
}
