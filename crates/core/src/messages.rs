//! Protobuf messages carried in BDIO archives
//!
//! Messages are declared with `prost` derives. Field tags follow declaration
//! order. Maps are `BTreeMap` so that every node is `Eq + Hash` and two
//! structurally identical nodes collapse to one member of a chunk set.
//!
//! Each message implements [`prost::Name`]; its type URL carries the
//! `type.googleapis.com/` prefix so version-2 envelopes match those written by
//! protobuf-java's `Any.pack`.

use prost_types::Timestamp;
use std::collections::BTreeMap;

/// Protobuf package of every BDIO message
pub const PROTO_PACKAGE: &str = "com.blackducksoftware.bdio.proto.domain";

/// Prefix of envelope type URLs
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com";

macro_rules! impl_name {
    ($ty:ident) => {
        impl ::prost::Name for $ty {
            const NAME: &'static str = stringify!($ty);
            const PACKAGE: &'static str = PROTO_PACKAGE;

            fn type_url() -> String {
                format!("{}/{}", TYPE_URL_PREFIX, <Self as ::prost::Name>::full_name())
            }
        }
    };
}

/// Kind of scan that produced the archive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ScanType {
    /// Signature (file hash) scan
    Signature = 0,
    /// Binary analysis scan
    Binary = 1,
    /// Container image scan
    Container = 2,
}

impl ScanType {
    /// Name as written in the protobuf schema
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ScanType::Signature => "SIGNATURE",
            ScanType::Binary => "BINARY",
            ScanType::Container => "CONTAINER",
        }
    }

    /// Parse a schema name
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "SIGNATURE" => Some(ScanType::Signature),
            "BINARY" => Some(ScanType::Binary),
            "CONTAINER" => Some(ScanType::Container),
            _ => None,
        }
    }
}

/// How a dependency was matched by binary analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BdbaMatchType {
    /// Matched by file signature
    Signature = 0,
    /// Matched by code similarity
    CodeSimilarity = 1,
}

impl BdbaMatchType {
    /// Name as written in the protobuf schema
    pub fn as_str_name(&self) -> &'static str {
        match self {
            BdbaMatchType::Signature => "Signature",
            BdbaMatchType::CodeSimilarity => "CodeSimilarity",
        }
    }

    /// Parse a schema name
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "Signature" => Some(BdbaMatchType::Signature),
            "CodeSimilarity" => Some(BdbaMatchType::CodeSimilarity),
            _ => None,
        }
    }
}

/// Scan metadata, exactly one per archive
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoScanHeader {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(enumeration = "ScanType", tag = "2")]
    pub scan_type: i32,
    #[prost(string, tag = "3")]
    pub code_location_name: String,
    #[prost(string, tag = "4")]
    pub publisher_name: String,
    #[prost(string, tag = "5")]
    pub publisher_version: String,
    #[prost(string, tag = "6")]
    pub publisher_comment: String,
    #[prost(string, tag = "7")]
    pub creator: String,
    #[prost(message, optional, tag = "8")]
    pub creation_time: Option<Timestamp>,
    #[prost(string, tag = "9")]
    pub base_dir: String,
    #[prost(bool, tag = "10")]
    pub with_string_search: bool,
    #[prost(bool, tag = "11")]
    pub with_snippet_matching: bool,
    #[prost(string, optional, tag = "12")]
    pub project_group_name: Option<String>,
    #[prost(string, optional, tag = "13")]
    pub project_name: Option<String>,
    #[prost(string, optional, tag = "14")]
    pub project_version_name: Option<String>,
    #[prost(string, optional, tag = "15")]
    pub source_repository: Option<String>,
    #[prost(string, optional, tag = "16")]
    pub source_branch: Option<String>,
    #[prost(string, optional, tag = "17")]
    pub correlation_id: Option<String>,
    #[prost(int64, optional, tag = "18")]
    pub match_confidence_threshold: Option<i64>,
    #[prost(bool, optional, tag = "19")]
    pub retain_unmatched_files: Option<bool>,
    #[prost(int64, optional, tag = "20")]
    pub file_system_size_in_bytes: Option<i64>,
}
impl_name!(ProtoScanHeader);

/// A file or directory found by a signature scan
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoFileNode {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub parent_id: i64,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub file_system_type: String,
    #[prost(int64, optional, tag = "5")]
    pub shallow_directory_count: Option<i64>,
    #[prost(int64, optional, tag = "6")]
    pub deep_directory_count: Option<i64>,
    #[prost(int64, optional, tag = "7")]
    pub deep_file_count: Option<i64>,
    #[prost(int64, optional, tag = "8")]
    pub distance_from_root: Option<i64>,
    #[prost(int64, optional, tag = "9")]
    pub distance_from_inner_root: Option<i64>,
    #[prost(string, tag = "10")]
    pub path: String,
    #[prost(string, optional, tag = "11")]
    pub archive_context: Option<String>,
    #[prost(string, tag = "12")]
    pub uri: String,
    #[prost(int64, tag = "13")]
    pub size: i64,
    /// Keyed by [`SignatureType`](crate::SignatureType) ordinal
    #[prost(btree_map = "int32, string", tag = "14")]
    pub signatures: BTreeMap<i32, String>,
}
impl_name!(ProtoFileNode);

/// A component matched in the scanned content
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoDependencyNode {
    #[prost(string, tag = "1")]
    pub component_id: String,
    #[prost(string, optional, tag = "2")]
    pub evidence_id: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub container_layer: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub whiteout_layer: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub description_id: Option<String>,
    #[prost(enumeration = "BdbaMatchType", repeated, tag = "6")]
    pub match_types: Vec<i32>,
}
impl_name!(ProtoDependencyNode);

/// A component identity (namespace plus identifier)
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoComponentNode {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub namespace: String,
    #[prost(string, tag = "3")]
    pub identifier: String,
    #[prost(string, optional, tag = "4")]
    pub description_id: Option<String>,
}
impl_name!(ProtoComponentNode);

/// Free text attached to another node
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoAnnotationNode {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub comment: String,
}
impl_name!(ProtoAnnotationNode);

/// A scanned container image
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoContainerNode {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub image: String,
    #[prost(string, tag = "3")]
    pub architecture: String,
    #[prost(string, repeated, tag = "4")]
    pub repo_tags: Vec<String>,
    #[prost(string, tag = "5")]
    pub os: String,
    #[prost(message, optional, tag = "6")]
    pub created_at: Option<Timestamp>,
    #[prost(string, tag = "7")]
    pub config: String,
    #[prost(string, repeated, tag = "8")]
    pub layers: Vec<String>,
    #[prost(string, repeated, tag = "9")]
    pub image_paths: Vec<String>,
}
impl_name!(ProtoContainerNode);

/// One layer of a container image
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoContainerLayerNode {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub layer: String,
    #[prost(int64, tag = "3")]
    pub size: i64,
    #[prost(string, optional, tag = "4")]
    pub command: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub created_at: Option<Timestamp>,
    #[prost(string, optional, tag = "6")]
    pub comment: Option<String>,
}
impl_name!(ProtoContainerLayerNode);

/// A file found by binary analysis
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProtoBdbaFileNode {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub uri: String,
    #[prost(int64, tag = "3")]
    pub size: i64,
    #[prost(message, optional, tag = "4")]
    pub last_modified_date_time: Option<Timestamp>,
    #[prost(string, optional, tag = "5")]
    pub file_system_type: Option<String>,
    #[prost(btree_map = "string, string", tag = "6")]
    pub signatures: BTreeMap<String, String>,
}
impl_name!(ProtoBdbaFileNode);
