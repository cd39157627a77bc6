//! Signature types of file nodes
//!
//! `ProtoFileNode.signatures` is keyed by the ordinal of a [`SignatureType`];
//! producers usually hold signatures keyed by name. The conversions here map
//! between the two and reject names or ordinals outside the table.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of hash recorded for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum SignatureType {
    /// SHA-1 of the file content
    MatchSha1 = 0,
    /// SHA-1 after whitespace/comment cleaning
    MatchCleanSha1 = 1,
    /// Deep directory signature including sizes
    DeepWithSize = 2,
    /// Deep directory signature without sizes
    DeepNoSize = 3,
    /// Directory structure only
    StructureOnly = 4,
    /// Shallow directory signature including sizes
    ShallowWithSize = 5,
    /// Shallow directory signature without sizes
    ShallowNoSize = 6,
}

impl SignatureType {
    /// Every signature type, in ordinal order
    pub const ALL: [SignatureType; 7] = [
        SignatureType::MatchSha1,
        SignatureType::MatchCleanSha1,
        SignatureType::DeepWithSize,
        SignatureType::DeepNoSize,
        SignatureType::StructureOnly,
        SignatureType::ShallowWithSize,
        SignatureType::ShallowNoSize,
    ];

    /// Map key used on the wire
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Look up by wire key
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Upper-case name, e.g. `MATCH_SHA1`
    pub fn name(self) -> &'static str {
        match self {
            SignatureType::MatchSha1 => "MATCH_SHA1",
            SignatureType::MatchCleanSha1 => "MATCH_CLEAN_SHA1",
            SignatureType::DeepWithSize => "DEEP_WITH_SIZE",
            SignatureType::DeepNoSize => "DEEP_NO_SIZE",
            SignatureType::StructureOnly => "STRUCTURE_ONLY",
            SignatureType::ShallowWithSize => "SHALLOW_WITH_SIZE",
            SignatureType::ShallowNoSize => "SHALLOW_NO_SIZE",
        }
    }

    /// Look up by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Convert name-keyed signatures into the wire map
    pub fn encode_map<'a, I>(signatures: I) -> Result<BTreeMap<i32, String>, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        signatures
            .into_iter()
            .map(|(name, value)| {
                Self::from_name(name)
                    .map(|t| (t.ordinal(), value.to_string()))
                    .ok_or_else(|| ValidationError::UnknownSignatureType(name.to_string()))
            })
            .collect()
    }

    /// Convert the wire map back into name-keyed signatures
    pub fn decode_map(
        signatures: &BTreeMap<i32, String>,
    ) -> Result<BTreeMap<&'static str, String>, ValidationError> {
        signatures
            .iter()
            .map(|(ordinal, value)| {
                Self::from_ordinal(*ordinal)
                    .map(|t| (t.name(), value.clone()))
                    .ok_or_else(|| ValidationError::UnknownSignatureType(ordinal.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
