//! Per-kind required fields, on write and on read

use crate::common::*;
use bdio::{
    read_chunk, write_prefix, EntryType, FieldRule, NodeValidator, V2Validator, ValidationError,
};
use prost::Message;

fn field_of(err: &BdioError) -> Option<&'static str> {
    match err {
        BdioError::Validation(inner) => inner.field(),
        _ => None,
    }
}

#[test]
fn each_kind_names_its_first_missing_field() {
    let cases: Vec<(Node, &str, &str)> = vec![
        (
            ProtoFileNode {
                name: String::new(),
                ..file_node(1)
            }
            .into(),
            "ProtoFileNode",
            "name",
        ),
        (
            ProtoDependencyNode {
                match_types: vec![],
                ..dependency_node(1)
            }
            .into(),
            "ProtoDependencyNode",
            "matchTypes",
        ),
        (
            ProtoComponentNode {
                namespace: " ".to_string(),
                ..component_node(1)
            }
            .into(),
            "ProtoComponentNode",
            "namespace",
        ),
        (
            ProtoAnnotationNode {
                comment: String::new(),
                ..annotation_node(1)
            }
            .into(),
            "ProtoAnnotationNode",
            "comment",
        ),
        (
            ProtoContainerNode {
                layers: vec![],
                ..container_node(1)
            }
            .into(),
            "ProtoContainerNode",
            "layers",
        ),
        (
            ProtoContainerLayerNode {
                layer: "\t".to_string(),
                ..container_layer_node(1)
            }
            .into(),
            "ProtoContainerLayerNode",
            "layer",
        ),
        (
            ProtoBdbaFileNode {
                last_modified_date_time: None,
                ..bdba_file_node(1)
            }
            .into(),
            "ProtoBdbaFileNode",
            "lastModifiedDateTime",
        ),
    ];

    for (node, message, field) in cases {
        let err = V2Validator.validate(&node).unwrap_err();
        assert_eq!(err.message_name(), message);
        assert_eq!(err.field(), Some(field));
        assert!(err.to_string().contains(message), "{}", err);
    }
}

#[test]
fn validation_is_deterministic() {
    // both name and uri are missing; name is always reported
    let node = Node::from(ProtoFileNode {
        name: String::new(),
        uri: String::new(),
        ..file_node(1)
    });
    let first = V2Validator.validate(&node).unwrap_err();
    for _ in 0..10 {
        assert_eq!(V2Validator.validate(&node).unwrap_err(), first);
    }
    assert!(matches!(
        first,
        ValidationError::Field {
            field: "name",
            rule: FieldRule::NonEmpty,
            ..
        }
    ));
}

#[test]
fn file_name_may_be_blank_but_not_empty() {
    let node = Node::from(ProtoFileNode {
        name: " ".to_string(),
        ..file_node(1)
    });
    assert!(V2Validator.validate(&node).is_ok());
}

#[test]
fn writer_reports_offending_field() {
    let mut writer =
        BdioWriter::zip(std::io::Cursor::new(Vec::new()), WriterConfig::default()).unwrap();
    writer.write_header(&make_header()).unwrap();
    writer.write_node(file_node(1)).unwrap();

    let err = writer
        .write_node(ProtoComponentNode {
            identifier: String::new(),
            ..component_node(1)
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(field_of(&err), Some("identifier"));

    // the failed node left the earlier one in place
    let contents = read_zip(&writer.close().unwrap().into_inner()).unwrap();
    assert_eq!(contents.nodes().len(), 1);
}

#[test]
fn write_nodes_stops_at_first_invalid() {
    let mut writer =
        BdioWriter::zip(std::io::Cursor::new(Vec::new()), WriterConfig::default()).unwrap();
    writer.write_header(&make_header()).unwrap();

    let nodes = vec![
        Node::from(file_node(1)),
        Node::from(file_node(2)),
        Node::from(ProtoAnnotationNode {
            id: String::new(),
            comment: "c".to_string(),
        }),
        Node::from(file_node(3)),
    ];
    assert!(writer.write_nodes(nodes).is_err());
    assert_eq!(writer.nodes_written(), 2);

    let contents = read_zip(&writer.close().unwrap().into_inner()).unwrap();
    let ids: Vec<i64> = {
        let mut ids: Vec<_> = contents.nodes().file_nodes().iter().map(|f| f.id).collect();
        ids.sort();
        ids
    };
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn reader_validates_decoded_nodes() {
    // an invalid node written without going through the writer
    let bad = ProtoFileNode {
        path: String::new(),
        ..file_node(1)
    };
    let mut entry = write_prefix(EntryType::Chunk, 1).to_vec();
    entry.extend(file_node(2).encode_length_delimited_to_vec());
    entry.extend(bad.encode_length_delimited_to_vec());

    let err = read_chunk(&mut entry.as_slice(), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(field_of(&err), Some("path"));
}
