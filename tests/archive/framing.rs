//! Entry prefix handling on the read side

use crate::common::*;
use bdio::{
    is_header_entry, read_chunk, read_header, read_prefix, write_prefix, EntryType,
    CURRENT_VERSION,
};

#[test]
fn written_prefixes_are_big_endian() {
    let archive = write_zip(WriterConfig::default(), &make_header(), vec![file_node(1)]);
    let entries = zip_entries(&archive);
    assert_eq!(&entries[0].1[..4], &[0x00, 0x00, 0x00, 0x02]);
    assert_eq!(&entries[1].1[..4], &[0x00, 0x01, 0x00, 0x02]);
    assert_eq!(write_prefix(EntryType::Chunk, CURRENT_VERSION), [0, 1, 0, 2]);
}

#[test]
fn truncated_prefix_is_framing_error() {
    for len in 0..4 {
        let bytes = [0u8, 1, 0, 2];
        let err = read_prefix(&mut &bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Framing, "{} bytes", len);
    }
}

#[test]
fn truncated_entry_in_archive_is_framing_error() {
    let header = zip_entries(&write_zip(
        WriterConfig::default(),
        &make_header(),
        Vec::<Node>::new(),
    ))
    .remove(0)
    .1;
    let archive = raw_zip(&[
        ("bdio-header.pb", header.as_slice()),
        ("bdio-entry-00.pb", &[0u8, 1, 0][..]),
    ]);
    assert_eq!(read_zip(&archive).unwrap_err().kind(), ErrorKind::Framing);
}

#[test]
fn truncated_node_is_framing_error() {
    let archive = write_zip(WriterConfig::default(), &make_header(), vec![file_node(1)]);
    let mut entries = zip_entries(&archive);
    let chunk = &mut entries[1].1;
    chunk.truncate(chunk.len() - 3);

    let err = read_chunk(&mut chunk.as_slice(), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Framing);
}

#[test]
fn unknown_entry_type_is_protocol_error() {
    let err = read_prefix(&mut &[0u8, 7, 0, 2][..]).unwrap_err();
    assert!(matches!(err, BdioError::UnknownEntryType(7)));
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn unknown_version_is_protocol_error() {
    let archive = raw_zip(&[("bdio-header.pb", &[0u8, 0, 0, 3, 1, 2, 3][..])]);
    let err = read_zip(&archive).unwrap_err();
    assert!(matches!(err, BdioError::UnknownVersion(3)));
    assert_eq!(err.kind(), ErrorKind::Protocol);

    let err = read_chunk(&mut &[0u8, 1, 0x7f, 0x7f][..], true).unwrap_err();
    assert!(matches!(err, BdioError::UnknownVersion(0x7f7f)));
}

#[test]
fn is_header_entry_consumes_entry_type_only() {
    let archive = write_zip(WriterConfig::default(), &make_header(), vec![file_node(1)]);
    let entries = zip_entries(&archive);

    let mut header = entries[0].1.as_slice();
    assert!(is_header_entry(&mut header).unwrap());
    assert_eq!(read_header(&mut header, false).unwrap(), make_header());

    let mut chunk = entries[1].1.as_slice();
    assert!(!is_header_entry(&mut chunk).unwrap());
    assert_eq!(read_chunk(&mut chunk, false).unwrap().len(), 1);
}

#[test]
fn verify_type_rejects_wrong_entry() {
    let archive = write_zip(WriterConfig::default(), &make_header(), vec![file_node(1)]);
    let entries = zip_entries(&archive);

    let err = read_chunk(&mut entries[0].1.as_slice(), true).unwrap_err();
    assert!(matches!(
        err,
        BdioError::UnexpectedEntryType {
            expected: EntryType::Chunk,
            actual: EntryType::Header,
        }
    ));
    assert!(read_header(&mut entries[1].1.as_slice(), true).is_err());
}
