//! Self-describing `Any` envelopes used by format version 2
//!
//! Typed messages go through [`Any::from_msg`] and [`Any::to_msg`]; this
//! module only adds dispatch of node envelopes over a version's kind table.

use bdio_core::{BdioError, Node, NodeKind, Result};
use prost::Message;
use prost_types::Any;

/// Wrap a node with the type URL of its kind
pub fn pack_node(node: &Node) -> Any {
    Any {
        type_url: node.kind().type_url(),
        value: node.encode_to_vec(),
    }
}

/// Fully qualified type name of an envelope (the part after the last `/`)
pub fn type_name(envelope: &Any) -> &str {
    match envelope.type_url.rfind('/') {
        Some(slash) => &envelope.type_url[slash + 1..],
        None => &envelope.type_url,
    }
}

/// Unwrap an envelope holding one of `kinds`
pub fn unpack_node(envelope: &Any, kinds: &[NodeKind]) -> Result<Node> {
    let name = type_name(envelope);
    let kind = kinds
        .iter()
        .copied()
        .find(|kind| kind.full_name() == name)
        .ok_or_else(|| BdioError::UnknownMessageType(envelope.type_url.clone()))?;
    Ok(kind.decode(&envelope.value)?)
}
