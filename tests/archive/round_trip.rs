//! Write-then-read round trips

use crate::common::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn file_strategy() -> impl Strategy<Value = ProtoFileNode> {
    (
        any::<i64>(),
        any::<i64>(),
        "[a-zA-Z0-9._-]{1,24}",
        "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        0i64..1_000_000,
        prop::option::of(0i64..100),
    )
        .prop_map(|(id, parent_id, name, path, size, depth)| ProtoFileNode {
            id,
            parent_id,
            uri: format!("file:///{}/{}", path, name),
            path: format!("./{}/{}", path, name),
            name,
            file_system_type: "REGULAR".to_string(),
            size,
            distance_from_root: depth,
            ..Default::default()
        })
}

fn v2_node_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        file_strategy().prop_map(Node::from),
        (0usize..50).prop_map(|n| Node::from(dependency_node(n))),
        (0usize..50).prop_map(|n| Node::from(component_node(n))),
        (0usize..50).prop_map(|n| Node::from(annotation_node(n))),
        (0usize..50).prop_map(|n| Node::from(container_node(n))),
        (0usize..50).prop_map(|n| Node::from(container_layer_node(n))),
        (0usize..50).prop_map(|n| Node::from(bdba_file_node(n))),
    ]
}

fn assert_same_set(contents: &BdioContents, nodes: &[Node]) {
    let expected: HashSet<&Node> = nodes.iter().collect();
    let merged = contents.nodes();
    assert_eq!(merged.len(), expected.len());
    for node in expected {
        assert!(merged.contains(node), "missing {:?}", node.kind());
    }
}

#[test]
fn every_v2_kind_survives() {
    let nodes = one_of_each(3);
    let archive = write_zip(WriterConfig::default(), &make_header(), nodes.clone());
    let contents = read_zip(&archive).unwrap();
    for kind in NodeKind::ALL {
        assert_eq!(contents.count(kind), 1, "{}", kind);
    }
    assert_same_set(&contents, &nodes);
}

#[test]
fn duplicates_collapse() {
    let nodes = vec![file_node(1), file_node(1), file_node(2), file_node(1)];
    let archive = write_zip(WriterConfig::default(), &make_header(), nodes);
    let contents = read_zip(&archive).unwrap();
    assert_eq!(contents.nodes().file_nodes().len(), 2);
}

#[test]
fn duplicates_collapse_across_entries() {
    let nodes: Vec<ProtoFileNode> = (1..=30).chain(1..=30).map(file_node).collect();
    let archive = write_zip(
        WriterConfig::new().with_max_chunk_size(300),
        &make_header(),
        nodes,
    );
    let contents = read_zip(&archive).unwrap();
    assert!(contents.chunks.len() > 2);
    assert_eq!(contents.nodes().file_nodes().len(), 30);
}

#[test]
fn header_fields_survive() {
    let header = ProtoScanHeader::new_random(ScanType::Binary)
        .with_code_location("code location")
        .with_publisher("bdio-tests", "1.2.3")
        .with_project("project", "version")
        .with_correlation_id(uuid::Uuid::new_v4());

    for version in [1, 2] {
        let archive = write_zip(
            WriterConfig::new().with_version(version),
            &header,
            Vec::<Node>::new(),
        );
        let contents = read_zip(&archive).unwrap();
        assert_eq!(contents.version, version);
        assert_eq!(contents.header, header);
        assert!(contents.chunks.is_empty());
    }
}

#[test]
fn header_only_archive_has_one_entry() {
    let archive = write_zip(WriterConfig::default(), &make_header(), Vec::<Node>::new());
    assert_eq!(zip_entries(&archive).len(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn v1_round_trip(files in prop::collection::vec(file_strategy(), 0..40)) {
        let nodes: Vec<Node> = files.into_iter().map(Node::from).collect();
        let archive = write_zip(
            WriterConfig::new().with_version(1).with_max_chunk_size(1024),
            &make_header(),
            nodes.clone(),
        );
        let contents = read_zip(&archive).unwrap();
        prop_assert_eq!(contents.version, 1);
        assert_same_set(&contents, &nodes);
    }

    #[test]
    fn v2_round_trip(nodes in prop::collection::vec(v2_node_strategy(), 0..40)) {
        let archive = write_zip(
            WriterConfig::new().with_max_chunk_size(2048),
            &make_header(),
            nodes.clone(),
        );
        let contents = read_zip(&archive).unwrap();
        prop_assert_eq!(contents.version, 2);
        assert_same_set(&contents, &nodes);
    }
}
