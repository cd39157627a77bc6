//! Field contracts of node and header messages
//!
//! Each node kind has a fixed set of required fields, checked in declaration
//! order so that a node missing several fields always fails on the same one.
//! Version 1 accepts only file nodes.

use bdio_core::{
    FieldRule, Node, ProtoAnnotationNode, ProtoBdbaFileNode, ProtoComponentNode,
    ProtoContainerLayerNode, ProtoContainerNode, ProtoDependencyNode, ProtoFileNode,
    ProtoScanHeader, ValidationError, VERSION_1, VERSION_2,
};
use prost::Name;
use std::fmt::Debug;

/// Checks node messages against the contract of one format version
pub trait NodeValidator: Send + Sync {
    /// Format version this validator enforces
    fn version(&self) -> i16;

    /// Validate one node
    fn validate(&self, node: &Node) -> Result<(), ValidationError>;
}

/// Validator for format version 1 (file nodes only)
#[derive(Debug, Default, Clone, Copy)]
pub struct V1Validator;

impl NodeValidator for V1Validator {
    fn version(&self) -> i16 {
        VERSION_1
    }

    fn validate(&self, node: &Node) -> Result<(), ValidationError> {
        match node {
            Node::File(file) => validate_file_node(file),
            other => Err(ValidationError::UnsupportedType {
                version: VERSION_1,
                message: other.kind().message_name(),
            }),
        }
    }
}

/// Validator for format version 2
#[derive(Debug, Default, Clone, Copy)]
pub struct V2Validator;

impl NodeValidator for V2Validator {
    fn version(&self) -> i16 {
        VERSION_2
    }

    fn validate(&self, node: &Node) -> Result<(), ValidationError> {
        match node {
            Node::File(m) => validate_file_node(m),
            Node::Dependency(m) => validate_dependency_node(m),
            Node::Component(m) => validate_component_node(m),
            Node::Annotation(m) => validate_annotation_node(m),
            Node::Container(m) => validate_container_node(m),
            Node::ContainerLayer(m) => validate_container_layer_node(m),
            Node::BdbaFile(m) => validate_bdba_file_node(m),
        }
    }
}

/// Validate a scan header: the id must not be blank
pub fn validate_header(header: &ProtoScanHeader) -> Result<(), ValidationError> {
    require_non_blank(ProtoScanHeader::NAME, "id", &header.id)
}

fn validate_file_node(node: &ProtoFileNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoFileNode::NAME;
    require_non_empty(MESSAGE, "name", &node.name)?;
    require_non_blank(MESSAGE, "path", &node.path)?;
    require_non_blank(MESSAGE, "uri", &node.uri)?;
    require_non_blank(MESSAGE, "fileSystemType", &node.file_system_type)
}

fn validate_dependency_node(node: &ProtoDependencyNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoDependencyNode::NAME;
    require_non_blank(MESSAGE, "componentId", &node.component_id)?;
    require_non_empty_list(MESSAGE, "matchTypes", &node.match_types)
}

fn validate_component_node(node: &ProtoComponentNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoComponentNode::NAME;
    require_non_blank(MESSAGE, "id", &node.id)?;
    require_non_blank(MESSAGE, "namespace", &node.namespace)?;
    require_non_blank(MESSAGE, "identifier", &node.identifier)
}

fn validate_annotation_node(node: &ProtoAnnotationNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoAnnotationNode::NAME;
    require_non_blank(MESSAGE, "id", &node.id)?;
    require_non_blank(MESSAGE, "comment", &node.comment)
}

fn validate_container_node(node: &ProtoContainerNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoContainerNode::NAME;
    require_non_blank(MESSAGE, "id", &node.id)?;
    require_non_blank(MESSAGE, "image", &node.image)?;
    require_non_blank(MESSAGE, "architecture", &node.architecture)?;
    require_non_blank(MESSAGE, "os", &node.os)?;
    require_non_blank(MESSAGE, "config", &node.config)?;
    require_non_empty_list(MESSAGE, "layers", &node.layers)
}

fn validate_container_layer_node(node: &ProtoContainerLayerNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoContainerLayerNode::NAME;
    require_non_blank(MESSAGE, "id", &node.id)?;
    require_non_blank(MESSAGE, "layer", &node.layer)
}

fn validate_bdba_file_node(node: &ProtoBdbaFileNode) -> Result<(), ValidationError> {
    const MESSAGE: &str = ProtoBdbaFileNode::NAME;
    require_non_blank(MESSAGE, "id", &node.id)?;
    require_non_blank(MESSAGE, "uri", &node.uri)?;
    require_present(
        MESSAGE,
        "lastModifiedDateTime",
        &node.last_modified_date_time,
    )
}

fn require_non_empty(
    message: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error(message, field, FieldRule::NonEmpty, value));
    }
    Ok(())
}

fn require_non_blank(
    message: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.chars().all(is_blank_char) {
        return Err(field_error(message, field, FieldRule::NonBlank, value));
    }
    Ok(())
}

/// Unicode whitespace except the no-break spaces and NEL, plus the ASCII
/// separators U+001C..=U+001F.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{0085}' => false,
        '\u{001C}'..='\u{001F}' => true,
        c => c.is_whitespace(),
    }
}

fn require_non_empty_list<T: Debug>(
    message: &'static str,
    field: &'static str,
    values: &[T],
) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(field_error(message, field, FieldRule::NonEmptyList, "[]"));
    }
    Ok(())
}

fn require_present<T>(
    message: &'static str,
    field: &'static str,
    value: &Option<T>,
) -> Result<(), ValidationError> {
    if value.is_none() {
        return Err(field_error(message, field, FieldRule::Present, "null"));
    }
    Ok(())
}

fn field_error(
    message: &'static str,
    field: &'static str,
    rule: FieldRule,
    value: &str,
) -> ValidationError {
    ValidationError::Field {
        message,
        field,
        rule,
        value: value.to_string(),
    }
}
