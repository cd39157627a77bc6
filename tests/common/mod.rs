//! Shared test utilities for the archive integration suite.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::Cursor;

pub use bdio::{
    BdioContents, BdioError, BdioReader, BdioWriter, Chunk, ContainerFormat, EntrySource,
    ErrorKind, Node, NodeKind, ProtoAnnotationNode, ProtoBdbaFileNode, ProtoComponentNode,
    ProtoContainerLayerNode, ProtoContainerNode, ProtoDependencyNode, ProtoFileNode,
    ProtoScanHeader, ScanType, WriterConfig, ZipSource,
};
use prost_types::Timestamp;

// ============================================================================
// Messages
// ============================================================================

/// Header used by most tests.
pub fn make_header() -> ProtoScanHeader {
    ProtoScanHeader::new("abc", ScanType::Signature)
}

/// A valid file node; `id` also drives the name and path.
pub fn file_node(id: i64) -> ProtoFileNode {
    ProtoFileNode {
        id,
        parent_id: id - 1,
        name: format!("{}.txt", id),
        path: format!("./dir/{}.txt", id),
        uri: format!("file:///dir/{}.txt", id),
        file_system_type: "REGULAR".to_string(),
        size: 10 * id,
        ..Default::default()
    }
}

pub fn dependency_node(n: usize) -> ProtoDependencyNode {
    ProtoDependencyNode {
        component_id: format!("component-{}", n),
        evidence_id: Some(format!("evidence-{}", n)),
        match_types: vec![bdio::BdbaMatchType::Signature as i32],
        ..Default::default()
    }
}

pub fn component_node(n: usize) -> ProtoComponentNode {
    ProtoComponentNode {
        id: format!("component-{}", n),
        namespace: "maven".to_string(),
        identifier: format!("org.example:lib-{}:1.0", n),
        description_id: None,
    }
}

pub fn annotation_node(n: usize) -> ProtoAnnotationNode {
    ProtoAnnotationNode {
        id: format!("annotation-{}", n),
        comment: format!("comment {}", n),
    }
}

pub fn container_node(n: usize) -> ProtoContainerNode {
    ProtoContainerNode {
        id: format!("container-{}", n),
        image: "registry.example/app".to_string(),
        architecture: "amd64".to_string(),
        repo_tags: vec!["latest".to_string()],
        os: "linux".to_string(),
        created_at: Some(timestamp()),
        config: "{}".to_string(),
        layers: vec![format!("sha256:{:064}", n)],
        image_paths: vec!["/".to_string()],
    }
}

pub fn container_layer_node(n: usize) -> ProtoContainerLayerNode {
    ProtoContainerLayerNode {
        id: format!("layer-{}", n),
        layer: format!("sha256:{:064}", n),
        size: 1024,
        command: Some("RUN true".to_string()),
        created_at: Some(timestamp()),
        comment: None,
    }
}

pub fn bdba_file_node(n: usize) -> ProtoBdbaFileNode {
    ProtoBdbaFileNode {
        id: format!("bdba-{}", n),
        uri: format!("file:///bin/{}", n),
        size: 4096,
        last_modified_date_time: Some(timestamp()),
        file_system_type: Some("FILE".to_string()),
        ..Default::default()
    }
}

/// One valid node of every version-2 kind.
pub fn one_of_each(n: usize) -> Vec<Node> {
    vec![
        Node::from(dependency_node(n)),
        Node::from(component_node(n)),
        Node::from(file_node(n as i64 + 1)),
        Node::from(annotation_node(n)),
        Node::from(container_node(n)),
        Node::from(container_layer_node(n)),
        Node::from(bdba_file_node(n)),
    ]
}

pub fn timestamp() -> Timestamp {
    Timestamp {
        seconds: 1_700_000_000,
        nanos: 0,
    }
}

// ============================================================================
// Archives
// ============================================================================

/// Write `header` and `nodes` into an in-memory ZIP archive.
pub fn write_zip<I, N>(config: WriterConfig, header: &ProtoScanHeader, nodes: I) -> Vec<u8>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    let mut writer = BdioWriter::zip(Cursor::new(Vec::new()), config).unwrap();
    writer.write_header(header).unwrap();
    writer.write_nodes(nodes).unwrap();
    writer.close().unwrap().into_inner()
}

/// Write `header` and `nodes` into an in-memory tar+zstd archive.
pub fn write_tar_zstd<I, N>(config: WriterConfig, header: &ProtoScanHeader, nodes: I) -> Vec<u8>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    let config = config.with_container(ContainerFormat::TarZstd);
    let mut writer = BdioWriter::tar_zstd(Vec::new(), config).unwrap();
    writer.write_header(header).unwrap();
    writer.write_nodes(nodes).unwrap();
    writer.close().unwrap()
}

/// Decode a ZIP archive completely.
pub fn read_zip(archive: &[u8]) -> bdio::Result<BdioContents> {
    BdioReader::zip(Cursor::new(archive))?.read_all()
}

/// Raw entries of a ZIP archive, in archive order.
pub fn zip_entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut source = ZipSource::new(Cursor::new(archive)).unwrap();
    let mut entries = Vec::new();
    while let Some(entry) = source.next_entry().unwrap() {
        entries.push((entry.name, entry.data));
    }
    entries
}

/// Build a ZIP archive from raw entries, bypassing the writer.
pub fn raw_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::FileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, FileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}
