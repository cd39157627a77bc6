//! Format version 2: `Any` envelopes, all node kinds

use super::{VersionReader, VersionWriter};
use crate::envelope;
use crate::framing::read_delimited;
use bdio_core::{BdioError, Node, NodeKind, ProtoScanHeader, Result, VERSION_2};
use prost::{Message, Name};
use prost_types::Any;
use std::io::Read;

/// Node kinds legal in version-2 chunks
pub const V2_NODE_KINDS: &[NodeKind] = &[
    NodeKind::Dependency,
    NodeKind::Component,
    NodeKind::File,
    NodeKind::Annotation,
    NodeKind::Container,
    NodeKind::ContainerLayer,
    NodeKind::BdbaFile,
];

/// Version-2 payload writer
#[derive(Debug, Default, Clone, Copy)]
pub struct V2Writer;

impl VersionWriter for V2Writer {
    fn version(&self) -> i16 {
        VERSION_2
    }

    fn encode_header(&self, header: &ProtoScanHeader) -> Result<Vec<u8>> {
        Ok(Any::from_msg(header)?.encode_to_vec())
    }

    fn encode_node(&self, node: &Node) -> Result<Vec<u8>> {
        if !V2_NODE_KINDS.contains(&node.kind()) {
            return Err(BdioError::UnknownMessageType(node.kind().type_url()));
        }
        Ok(envelope::pack_node(node).encode_length_delimited_to_vec())
    }
}

/// Version-2 payload reader
#[derive(Debug, Default, Clone, Copy)]
pub struct V2Reader;

impl VersionReader for V2Reader {
    fn version(&self) -> i16 {
        VERSION_2
    }

    fn decode_header(&self, payload: &[u8]) -> Result<ProtoScanHeader> {
        let any = Any::decode(payload)?;
        if envelope::type_name(&any) != ProtoScanHeader::full_name() {
            return Err(BdioError::UnknownHeaderType(any.type_url));
        }
        Ok(any.to_msg()?)
    }

    fn read_node(&self, reader: &mut dyn Read) -> Result<Option<Node>> {
        match read_delimited(reader)? {
            Some(body) => {
                let any = Any::decode(body.as_slice())?;
                envelope::unpack_node(&any, V2_NODE_KINDS).map(Some)
            }
            None => Ok(None),
        }
    }
}
