//! The tar+zstd container backend

use crate::common::*;
use bdio::{read_header_from_archive, BdioEntry, TarZstdSource};
use std::fs::File;
use std::io::BufReader;

#[test]
fn tar_zstd_round_trip() {
    let nodes = one_of_each(5);
    let archive = write_tar_zstd(
        WriterConfig::new().with_container(ContainerFormat::TarZstd),
        &make_header(),
        nodes.clone(),
    );
    assert_eq!(ContainerFormat::detect(&archive), Some(ContainerFormat::TarZstd));

    let contents = BdioReader::tar_zstd(archive.as_slice())
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(contents.header, make_header());
    for node in &nodes {
        assert!(contents.nodes().contains(node));
    }
}

#[test]
fn tar_zstd_entry_order_matches_zip() {
    let nodes: Vec<Node> = (1..=40).map(|i| Node::from(file_node(i))).collect();
    let config = WriterConfig::new().with_max_chunk_size(400);
    let zip = write_zip(config.clone(), &make_header(), nodes.clone());
    let tar = write_tar_zstd(config, &make_header(), nodes);

    let zip_names: Vec<String> = zip_entries(&zip).into_iter().map(|(n, _)| n).collect();
    let mut reader = BdioReader::tar_zstd(tar.as_slice()).unwrap();
    let mut tar_names = Vec::new();
    while let Some(entry) = reader.next_entry().unwrap() {
        if let BdioEntry::Chunk { version, .. } = &entry {
            assert_eq!(*version, 2);
        }
        tar_names.push(entry.name().to_string());
    }
    assert_eq!(tar_names, zip_names);
}

#[test]
fn tar_zstd_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.bdio.tar.zst");

    let mut writer = BdioWriter::tar_zstd(
        File::create(&path).unwrap(),
        WriterConfig::new()
            .with_container(ContainerFormat::TarZstd)
            .with_compression_level(19),
    )
    .unwrap();
    writer.write_header(&make_header()).unwrap();
    writer.write_nodes((1..=10).map(file_node)).unwrap();
    writer.close().unwrap();

    let mut source = TarZstdSource::new(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(read_header_from_archive(&mut source).unwrap(), make_header());

    let contents = BdioReader::tar_zstd(File::open(&path).unwrap())
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(contents.nodes().file_nodes().len(), 10);
}

#[test]
fn zip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.bdio");

    let mut writer = BdioWriter::zip(File::create(&path).unwrap(), WriterConfig::default()).unwrap();
    writer.write_header(&make_header()).unwrap();
    writer.write_nodes(one_of_each(0)).unwrap();
    writer.close().unwrap();

    let contents = BdioReader::zip(File::open(&path).unwrap())
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(contents.nodes().len(), NodeKind::ALL.len());
}

#[test]
fn create_follows_configured_container() {
    for format in [ContainerFormat::Zip, ContainerFormat::TarZstd] {
        let config = WriterConfig::new().with_container(format);
        let mut writer = BdioWriter::create(std::io::Cursor::new(Vec::new()), config).unwrap();
        writer.write_header(&make_header()).unwrap();
        writer.write_node(file_node(1)).unwrap();
        let archive = writer.close().unwrap().into_inner();
        assert_eq!(ContainerFormat::detect(&archive), Some(format));
    }
}

#[test]
fn constructor_must_match_configured_container() {
    let tar_config = WriterConfig::new().with_container(ContainerFormat::TarZstd);
    let err = BdioWriter::zip(std::io::Cursor::new(Vec::new()), tar_config)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("tar-zstd"));

    let err = BdioWriter::tar_zstd(Vec::new(), WriterConfig::default())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Config);
}
