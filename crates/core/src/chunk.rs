//! Decoded chunk entries
//!
//! A [`Chunk`] is one set per node kind. Sets de-duplicate by full structural
//! equality: adding two identical nodes leaves one member.

use crate::messages::{
    ProtoAnnotationNode, ProtoBdbaFileNode, ProtoComponentNode, ProtoContainerLayerNode,
    ProtoContainerNode, ProtoDependencyNode, ProtoFileNode,
};
use crate::node::{Node, NodeKind};
use std::collections::HashSet;

/// Typed node sets decoded from one or more chunk entries
///
/// Immutable once built; use [`ChunkBuilder`] to assemble one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    file_nodes: HashSet<ProtoFileNode>,
    dependency_nodes: HashSet<ProtoDependencyNode>,
    component_nodes: HashSet<ProtoComponentNode>,
    annotation_nodes: HashSet<ProtoAnnotationNode>,
    container_nodes: HashSet<ProtoContainerNode>,
    container_layer_nodes: HashSet<ProtoContainerLayerNode>,
    bdba_file_nodes: HashSet<ProtoBdbaFileNode>,
}

impl Chunk {
    /// File nodes
    pub fn file_nodes(&self) -> &HashSet<ProtoFileNode> {
        &self.file_nodes
    }

    /// Dependency nodes
    pub fn dependency_nodes(&self) -> &HashSet<ProtoDependencyNode> {
        &self.dependency_nodes
    }

    /// Component nodes
    pub fn component_nodes(&self) -> &HashSet<ProtoComponentNode> {
        &self.component_nodes
    }

    /// Annotation nodes
    pub fn annotation_nodes(&self) -> &HashSet<ProtoAnnotationNode> {
        &self.annotation_nodes
    }

    /// Container nodes
    pub fn container_nodes(&self) -> &HashSet<ProtoContainerNode> {
        &self.container_nodes
    }

    /// Container layer nodes
    pub fn container_layer_nodes(&self) -> &HashSet<ProtoContainerLayerNode> {
        &self.container_layer_nodes
    }

    /// Binary-analysis file nodes
    pub fn bdba_file_nodes(&self) -> &HashSet<ProtoBdbaFileNode> {
        &self.bdba_file_nodes
    }

    /// Number of distinct nodes of one kind
    pub fn count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::File => self.file_nodes.len(),
            NodeKind::Dependency => self.dependency_nodes.len(),
            NodeKind::Component => self.component_nodes.len(),
            NodeKind::Annotation => self.annotation_nodes.len(),
            NodeKind::Container => self.container_nodes.len(),
            NodeKind::ContainerLayer => self.container_layer_nodes.len(),
            NodeKind::BdbaFile => self.bdba_file_nodes.len(),
        }
    }

    /// Number of distinct nodes across all kinds
    pub fn len(&self) -> usize {
        NodeKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    /// True when no node of any kind is present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this exact node is a member
    pub fn contains(&self, node: &Node) -> bool {
        match node {
            Node::File(m) => self.file_nodes.contains(m),
            Node::Dependency(m) => self.dependency_nodes.contains(m),
            Node::Component(m) => self.component_nodes.contains(m),
            Node::Annotation(m) => self.annotation_nodes.contains(m),
            Node::Container(m) => self.container_nodes.contains(m),
            Node::ContainerLayer(m) => self.container_layer_nodes.contains(m),
            Node::BdbaFile(m) => self.bdba_file_nodes.contains(m),
        }
    }

    /// Set union of several chunks, e.g. all chunk entries of one archive
    pub fn merge<I>(chunks: I) -> Chunk
    where
        I: IntoIterator<Item = Chunk>,
    {
        let mut merged = Chunk::default();
        for chunk in chunks {
            merged.file_nodes.extend(chunk.file_nodes);
            merged.dependency_nodes.extend(chunk.dependency_nodes);
            merged.component_nodes.extend(chunk.component_nodes);
            merged.annotation_nodes.extend(chunk.annotation_nodes);
            merged.container_nodes.extend(chunk.container_nodes);
            merged.container_layer_nodes.extend(chunk.container_layer_nodes);
            merged.bdba_file_nodes.extend(chunk.bdba_file_nodes);
        }
        merged
    }
}

/// Accumulates decoded nodes into a [`Chunk`]
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    chunk: Chunk,
}

impl ChunkBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the set for its kind
    ///
    /// Returns false if an identical node was already present.
    pub fn add(&mut self, node: Node) -> bool {
        let chunk = &mut self.chunk;
        match node {
            Node::File(m) => chunk.file_nodes.insert(m),
            Node::Dependency(m) => chunk.dependency_nodes.insert(m),
            Node::Component(m) => chunk.component_nodes.insert(m),
            Node::Annotation(m) => chunk.annotation_nodes.insert(m),
            Node::Container(m) => chunk.container_nodes.insert(m),
            Node::ContainerLayer(m) => chunk.container_layer_nodes.insert(m),
            Node::BdbaFile(m) => chunk.bdba_file_nodes.insert(m),
        }
    }

    /// Finish building
    pub fn build(self) -> Chunk {
        self.chunk
    }
}

impl FromIterator<Node> for Chunk {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut builder = ChunkBuilder::new();
        for node in iter {
            builder.add(node);
        }
        builder.build()
    }
}
