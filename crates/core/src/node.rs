//! Node tagged union
//!
//! [`Node`] is the closed set of node messages a chunk can carry. Which
//! kinds are legal in a given format version is data (a slice of
//! [`NodeKind`]) held by the version registry, not a property of the enum.

use crate::messages::{
    ProtoAnnotationNode, ProtoBdbaFileNode, ProtoComponentNode, ProtoContainerLayerNode,
    ProtoContainerNode, ProtoDependencyNode, ProtoFileNode,
};
use prost::{Message, Name};
use std::fmt;

/// Discriminant of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// [`ProtoFileNode`]
    File,
    /// [`ProtoDependencyNode`]
    Dependency,
    /// [`ProtoComponentNode`]
    Component,
    /// [`ProtoAnnotationNode`]
    Annotation,
    /// [`ProtoContainerNode`]
    Container,
    /// [`ProtoContainerLayerNode`]
    ContainerLayer,
    /// [`ProtoBdbaFileNode`]
    BdbaFile,
}

impl NodeKind {
    /// Every node kind, in declaration order
    pub const ALL: [NodeKind; 7] = [
        NodeKind::File,
        NodeKind::Dependency,
        NodeKind::Component,
        NodeKind::Annotation,
        NodeKind::Container,
        NodeKind::ContainerLayer,
        NodeKind::BdbaFile,
    ];

    /// Protobuf message name, e.g. `ProtoFileNode`
    pub fn message_name(self) -> &'static str {
        match self {
            NodeKind::File => ProtoFileNode::NAME,
            NodeKind::Dependency => ProtoDependencyNode::NAME,
            NodeKind::Component => ProtoComponentNode::NAME,
            NodeKind::Annotation => ProtoAnnotationNode::NAME,
            NodeKind::Container => ProtoContainerNode::NAME,
            NodeKind::ContainerLayer => ProtoContainerLayerNode::NAME,
            NodeKind::BdbaFile => ProtoBdbaFileNode::NAME,
        }
    }

    /// Fully qualified protobuf name
    pub fn full_name(self) -> String {
        match self {
            NodeKind::File => ProtoFileNode::full_name(),
            NodeKind::Dependency => ProtoDependencyNode::full_name(),
            NodeKind::Component => ProtoComponentNode::full_name(),
            NodeKind::Annotation => ProtoAnnotationNode::full_name(),
            NodeKind::Container => ProtoContainerNode::full_name(),
            NodeKind::ContainerLayer => ProtoContainerLayerNode::full_name(),
            NodeKind::BdbaFile => ProtoBdbaFileNode::full_name(),
        }
    }

    /// Envelope type URL
    pub fn type_url(self) -> String {
        match self {
            NodeKind::File => ProtoFileNode::type_url(),
            NodeKind::Dependency => ProtoDependencyNode::type_url(),
            NodeKind::Component => ProtoComponentNode::type_url(),
            NodeKind::Annotation => ProtoAnnotationNode::type_url(),
            NodeKind::Container => ProtoContainerNode::type_url(),
            NodeKind::ContainerLayer => ProtoContainerLayerNode::type_url(),
            NodeKind::BdbaFile => ProtoBdbaFileNode::type_url(),
        }
    }

    /// Decode a message body of this kind
    pub fn decode(self, bytes: &[u8]) -> Result<Node, prost::DecodeError> {
        Ok(match self {
            NodeKind::File => Node::File(ProtoFileNode::decode(bytes)?),
            NodeKind::Dependency => Node::Dependency(ProtoDependencyNode::decode(bytes)?),
            NodeKind::Component => Node::Component(ProtoComponentNode::decode(bytes)?),
            NodeKind::Annotation => Node::Annotation(ProtoAnnotationNode::decode(bytes)?),
            NodeKind::Container => Node::Container(ProtoContainerNode::decode(bytes)?),
            NodeKind::ContainerLayer => {
                Node::ContainerLayer(ProtoContainerLayerNode::decode(bytes)?)
            }
            NodeKind::BdbaFile => Node::BdbaFile(ProtoBdbaFileNode::decode(bytes)?),
        })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_name())
    }
}

/// One node message of any kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// File or directory
    File(ProtoFileNode),
    /// Matched dependency
    Dependency(ProtoDependencyNode),
    /// Component identity
    Component(ProtoComponentNode),
    /// Annotation
    Annotation(ProtoAnnotationNode),
    /// Container image
    Container(ProtoContainerNode),
    /// Container layer
    ContainerLayer(ProtoContainerLayerNode),
    /// Binary-analysis file
    BdbaFile(ProtoBdbaFileNode),
}

impl Node {
    /// Kind tag of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Dependency(_) => NodeKind::Dependency,
            Node::Component(_) => NodeKind::Component,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::Container(_) => NodeKind::Container,
            Node::ContainerLayer(_) => NodeKind::ContainerLayer,
            Node::BdbaFile(_) => NodeKind::BdbaFile,
        }
    }

    /// Serialized size of the bare message (no envelope, no delimiter)
    pub fn encoded_len(&self) -> usize {
        match self {
            Node::File(m) => m.encoded_len(),
            Node::Dependency(m) => m.encoded_len(),
            Node::Component(m) => m.encoded_len(),
            Node::Annotation(m) => m.encoded_len(),
            Node::Container(m) => m.encoded_len(),
            Node::ContainerLayer(m) => m.encoded_len(),
            Node::BdbaFile(m) => m.encoded_len(),
        }
    }

    /// Serialize the bare message
    pub fn encode_to_vec(&self) -> Vec<u8> {
        match self {
            Node::File(m) => m.encode_to_vec(),
            Node::Dependency(m) => m.encode_to_vec(),
            Node::Component(m) => m.encode_to_vec(),
            Node::Annotation(m) => m.encode_to_vec(),
            Node::Container(m) => m.encode_to_vec(),
            Node::ContainerLayer(m) => m.encode_to_vec(),
            Node::BdbaFile(m) => m.encode_to_vec(),
        }
    }
}

macro_rules! impl_from_message {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(message: $ty) -> Self {
                    Node::$variant(message)
                }
            }
        )*
    };
}

impl_from_message! {
    File => ProtoFileNode,
    Dependency => ProtoDependencyNode,
    Component => ProtoComponentNode,
    Annotation => ProtoAnnotationNode,
    Container => ProtoContainerNode,
    ContainerLayer => ProtoContainerLayerNode,
    BdbaFile => ProtoBdbaFileNode,
}
