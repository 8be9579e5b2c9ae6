//! Comment builder for fluent API

use super::model::Comment;
use super::votes::VoteSet;
use crate::error::{QaError, Result};
use crate::types::CommentId;
use chrono::Utc;

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    author_slug: String,
    text: Option<String>,
    expert_slug: Option<String>,
    parent_id: Option<CommentId>,
}

impl CommentBuilder {
    /// Create a new builder for a comment by `author_slug`
    pub fn new(author_slug: impl Into<String>) -> Self {
        Self {
            author_slug: author_slug.into(),
            text: None,
            expert_slug: None,
            parent_id: None,
        }
    }

    /// Set the comment text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach the comment to an expert
    pub fn expert(mut self, expert_slug: impl Into<String>) -> Self {
        self.expert_slug = Some(expert_slug.into());
        self
    }

    /// Set the expert if one was given
    pub fn maybe_expert(mut self, expert_slug: Option<String>) -> Self {
        self.expert_slug = expert_slug;
        self
    }

    /// Make this a reply to `parent`
    pub fn reply_to(mut self, parent: CommentId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Set the parent reference directly
    pub fn parent(mut self, parent: Option<CommentId>) -> Self {
        self.parent_id = parent;
        self
    }

    /// Build the comment with a fresh id and no votes
    pub fn build(self) -> Result<Comment> {
        let text = self
            .text
            .ok_or_else(|| QaError::Validation("Comment text is required".to_string()))?;

        if self.author_slug.trim().is_empty() {
            return Err(QaError::Validation("Comment author is required".to_string()));
        }

        let now = Utc::now();
        Ok(Comment {
            id: CommentId::generate(),
            expert_slug: self.expert_slug,
            author_slug: self.author_slug,
            text,
            parent_id: self.parent_id,
            voters: VoteSet::new(),
            created_at: now,
            updated_at: now,
        })
    }
}
