//! Core type definitions for qa-threads

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Literal parent id that legacy payloads use to mark a top-level comment
pub const TOP_LEVEL_SENTINEL: &str = "-1";

/// Unique identifier for a comment or reply
///
/// Generated ids are UUID v4 strings. Lookups accept any string, an id that
/// was never issued simply resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    /// Generate a new CommentId
    pub fn generate() -> Self {
        CommentId(Uuid::new_v4().to_string())
    }

    /// Create a CommentId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        CommentId(s.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interpret a raw parent id from a payload.
///
/// The sentinel maps to `None` (top-level); anything else is a reply target.
pub fn parse_parent_ref(raw: &str) -> Option<CommentId> {
    let raw = raw.trim();
    if raw == TOP_LEVEL_SENTINEL {
        None
    } else {
        Some(CommentId::from_string(raw))
    }
}

/// Serde adapter storing `Option<CommentId>` with the legacy sentinel
pub mod parent_ref {
    use super::{parse_parent_ref, CommentId, TOP_LEVEL_SENTINEL};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(parent: &Option<CommentId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match parent {
            Some(id) => serializer.serialize_str(id.as_str()),
            None => serializer.serialize_str(TOP_LEVEL_SENTINEL),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CommentId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_parent_ref))
    }
}
