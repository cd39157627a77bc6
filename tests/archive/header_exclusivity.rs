//! Header write ordering

use crate::common::*;
use std::io::Cursor;

fn zip_writer() -> BdioWriter<bdio::ZipSink<Cursor<Vec<u8>>>> {
    BdioWriter::zip(Cursor::new(Vec::new()), WriterConfig::default()).unwrap()
}

#[test]
fn second_header_is_rejected_and_first_kept() {
    let mut writer = zip_writer();
    writer.write_header(&make_header()).unwrap();

    let other = ProtoScanHeader::new("other", ScanType::Container);
    let err = writer.write_header(&other).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
    assert!(matches!(err, BdioError::HeaderAlreadyWritten));

    writer.write_node(file_node(1)).unwrap();
    let archive = writer.close().unwrap().into_inner();

    let headers: Vec<_> = zip_entries(&archive)
        .into_iter()
        .filter(|(name, _)| name == "bdio-header.pb")
        .collect();
    assert_eq!(headers.len(), 1);
    assert_eq!(read_zip(&archive).unwrap().header, make_header());
}

#[test]
fn node_before_header_is_state_error() {
    let mut writer = zip_writer();
    let err = writer.write_node(file_node(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
    assert!(!writer.is_header_written());
}

#[test]
fn close_without_header_is_state_error() {
    let err = zip_writer().close().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn blank_header_id_is_validation_error() {
    let mut writer = zip_writer();
    let err = writer
        .write_header(&ProtoScanHeader::new("   ", ScanType::Signature))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!writer.is_header_written());
}

#[test]
fn duplicate_header_entries_fail_on_read() {
    let archive = write_zip(WriterConfig::default(), &make_header(), vec![file_node(1)]);
    let entries = zip_entries(&archive);
    let header = entries[0].1.as_slice();
    let archive = raw_zip(&[
        ("bdio-header.pb", header),
        ("bdio-entry-00.pb", entries[1].1.as_slice()),
        ("bdio-header-copy.pb", header),
    ]);

    let err = read_zip(&archive).unwrap_err();
    assert!(matches!(err, BdioError::DuplicateHeader(ref name) if name == "bdio-header-copy.pb"));
}
