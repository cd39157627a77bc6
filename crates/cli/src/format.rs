//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): aligned text, one entry per line
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use bdio_core::{Chunk, NodeKind, ProtoScanHeader};
use bdio_protobuf::{BdioContents, BdioEntry, VersionedHeader};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// One line of `bdio summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub name: String,
    pub entry_type: String,
    pub version: i16,
    pub size: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<&'static str, usize>,
}

impl From<&BdioEntry> for EntrySummary {
    fn from(entry: &BdioEntry) -> Self {
        let nodes = match entry {
            BdioEntry::Chunk { chunk, .. } => node_counts(chunk),
            BdioEntry::Header { .. } => BTreeMap::new(),
        };
        EntrySummary {
            name: entry.name().to_string(),
            entry_type: entry.entry_type().to_string(),
            version: entry.version(),
            size: entry.size(),
            nodes,
        }
    }
}

/// Non-zero node counts of a chunk, keyed by message name.
pub fn node_counts(chunk: &Chunk) -> BTreeMap<&'static str, usize> {
    NodeKind::ALL
        .iter()
        .map(|kind| (kind.message_name(), chunk.count(*kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Format a decoded header.
pub fn format_header(header: &VersionedHeader, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&header_json(header)),
        OutputMode::Human => header_fields(header)
            .into_iter()
            .map(|(key, value)| format!("{:<16} {}", format!("{}:", key), value))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format the entry listing.
pub fn format_summary(entries: &[EntrySummary], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({
            "entries": entries,
            "total_nodes": entries.iter().flat_map(|e| e.nodes.values()).sum::<usize>(),
        })),
        OutputMode::Human => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            entries
                .iter()
                .map(|entry| {
                    let mut line = format!(
                        "{:<width$}  {:<6}  v{}  {:>10} bytes",
                        entry.name,
                        entry.entry_type,
                        entry.version,
                        entry.size,
                        width = width
                    );
                    for (name, count) in &entry.nodes {
                        line.push_str(&format!("  {}={}", name, count));
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format the result of a successful `bdio verify`.
pub fn format_verified(contents: &BdioContents, mode: OutputMode) -> String {
    let nodes = node_counts(&contents.nodes());
    let total: usize = nodes.values().sum();
    match mode {
        OutputMode::Json => pretty(&json!({
            "valid": true,
            "version": contents.version,
            "header_id": contents.header.id,
            "chunk_entries": contents.chunks.len(),
            "nodes": nodes,
            "total_nodes": total,
        })),
        OutputMode::Human => format!(
            "OK (version {}, {} chunk entries, {} distinct nodes)",
            contents.version,
            contents.chunks.len(),
            total
        ),
    }
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&json!({
            "error": format!("{:#}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn header_json(versioned: &VersionedHeader) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = header_fields(versioned)
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
        .collect();
    serde_json::Value::Object(fields)
}

/// Populated header fields, in display order.
fn header_fields(versioned: &VersionedHeader) -> Vec<(&'static str, String)> {
    let header: &ProtoScanHeader = &versioned.header;
    let mut fields = vec![
        ("version", versioned.version.to_string()),
        ("id", header.id.clone()),
        ("scan_type", header.scan_type().as_str_name().to_string()),
    ];

    let mut push = |key: &'static str, value: &str| {
        if !value.is_empty() {
            fields.push((key, value.to_string()));
        }
    };
    push("code_location", &header.code_location_name);
    push("publisher", &header.publisher_name);
    push("publisher_version", &header.publisher_version);
    push("creator", &header.creator);
    push("base_dir", &header.base_dir);
    push("project_group", header.project_group_name());
    push("project", header.project_name());
    push("project_version", header.project_version_name());
    push("correlation_id", header.correlation_id());

    if let Some(at) = header.creation_time_utc() {
        fields.push(("creation_time", at.to_rfc3339()));
    }
    fields
}
