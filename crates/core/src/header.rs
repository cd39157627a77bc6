//! Scan header construction helpers

use crate::messages::{ProtoScanHeader, ScanType};
use crate::time::{from_timestamp, to_timestamp};
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl ProtoScanHeader {
    /// Header with the given id and scan type, every other field default
    pub fn new(id: impl Into<String>, scan_type: ScanType) -> Self {
        let mut header = ProtoScanHeader {
            id: id.into(),
            ..Default::default()
        };
        header.set_scan_type(scan_type);
        header
    }

    /// Header with a random v4 UUID as id, created now
    pub fn new_random(scan_type: ScanType) -> Self {
        Self::new(Uuid::new_v4().to_string(), scan_type).with_creation_time(Utc::now())
    }

    /// Set the creation time
    pub fn with_creation_time(mut self, at: DateTime<Utc>) -> Self {
        self.creation_time = Some(to_timestamp(at));
        self
    }

    /// Set the code location name
    pub fn with_code_location(mut self, name: impl Into<String>) -> Self {
        self.code_location_name = name.into();
        self
    }

    /// Set publisher name and version
    pub fn with_publisher(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.publisher_name = name.into();
        self.publisher_version = version.into();
        self
    }

    /// Set project and project version names
    pub fn with_project(mut self, project: impl Into<String>, version: impl Into<String>) -> Self {
        self.project_name = Some(project.into());
        self.project_version_name = Some(version.into());
        self
    }

    /// Set the correlation id
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id.to_string());
        self
    }

    /// Creation time as a UTC instant
    pub fn creation_time_utc(&self) -> Option<DateTime<Utc>> {
        self.creation_time.as_ref().and_then(from_timestamp)
    }

    /// Correlation id parsed as a UUID
    ///
    /// `None` when the field is unset; `Some(Err(_))` when it is set but not a UUID.
    pub fn correlation_uuid(&self) -> Option<Result<Uuid, uuid::Error>> {
        self.correlation_id.as_deref().map(Uuid::parse_str)
    }
}
