//! Format version 1: raw messages, file nodes only

use super::{VersionReader, VersionWriter};
use crate::framing::read_delimited;
use bdio_core::{
    BdioError, Node, NodeKind, ProtoFileNode, ProtoScanHeader, Result, VERSION_1,
};
use prost::Message;
use std::io::Read;

/// Node kinds legal in version-1 chunks
pub const V1_NODE_KINDS: &[NodeKind] = &[NodeKind::File];

/// Version-1 payload writer
#[derive(Debug, Default, Clone, Copy)]
pub struct V1Writer;

impl VersionWriter for V1Writer {
    fn version(&self) -> i16 {
        VERSION_1
    }

    fn encode_header(&self, header: &ProtoScanHeader) -> Result<Vec<u8>> {
        Ok(header.encode_to_vec())
    }

    fn encode_node(&self, node: &Node) -> Result<Vec<u8>> {
        match node {
            Node::File(file) => Ok(file.encode_length_delimited_to_vec()),
            other => Err(BdioError::UnknownMessageType(other.kind().type_url())),
        }
    }
}

/// Version-1 payload reader
#[derive(Debug, Default, Clone, Copy)]
pub struct V1Reader;

impl VersionReader for V1Reader {
    fn version(&self) -> i16 {
        VERSION_1
    }

    fn decode_header(&self, payload: &[u8]) -> Result<ProtoScanHeader> {
        Ok(ProtoScanHeader::decode(payload)?)
    }

    fn read_node(&self, reader: &mut dyn Read) -> Result<Option<Node>> {
        match read_delimited(reader)? {
            Some(body) => Ok(Some(Node::File(ProtoFileNode::decode(body.as_slice())?))),
            None => Ok(None),
        }
    }
}
