//! Comment data models

use super::votes::VoteSet;
use crate::types::{parent_ref, CommentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored comment or reply.
///
/// Top-level comments and replies share this flat record; a reply is a
/// record whose `parent_id` points at a top-level comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Expert the thread is attached to
    #[serde(
        rename = "expert",
        alias = "expertSlug",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expert_slug: Option<String>,
    /// Author profile slug
    #[serde(rename = "author", alias = "authorSlug")]
    pub author_slug: String,
    /// Comment body
    pub text: String,
    /// Parent comment, `None` for top-level
    #[serde(with = "parent_ref", default)]
    pub parent_id: Option<CommentId>,
    /// Likes
    #[serde(default)]
    pub voters: VoteSet,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Check whether this is a top-level comment
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether this record replies to `parent`
    pub fn is_reply_to(&self, parent: &CommentId) -> bool {
        self.parent_id.as_ref() == Some(parent)
    }

    /// Check whether this is a top-level comment on `expert`
    pub fn is_thread_root_for(&self, expert: &str) -> bool {
        self.is_top_level() && self.expert_slug.as_deref() == Some(expert)
    }

    /// Replace the text and refresh updated_at
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    /// Refresh updated_at
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
