//! Comment service: validation and orchestration of every comment operation

use crate::api::{AddCommentRequest, DeleteCommentRequest, UpdateCommentRequest, VoteRequest};
use crate::comment::{CommentBuilder, CommentValidator};
use crate::config::CommentConfig;
use crate::error::Result;
use crate::profile::ProfileDirectory;
use crate::store::CommentStore;
use crate::tree::{CommentNode, TreeAssembler};
use crate::types::{parse_parent_ref, CommentId};
use std::sync::Arc;
use tracing::{debug, info};

/// Service over a comment store and a profile directory.
///
/// Holds no mutable state of its own; every call is an independent
/// request against the shared store.
pub struct CommentService {
    store: Arc<dyn CommentStore>,
    profiles: Arc<dyn ProfileDirectory>,
    validator: CommentValidator,
}

impl CommentService {
    /// Create a new service owning its backends
    pub fn new(
        store: impl CommentStore + 'static,
        profiles: impl ProfileDirectory + 'static,
    ) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(profiles))
    }

    /// Create a new service over shared backends
    pub fn with_shared(store: Arc<dyn CommentStore>, profiles: Arc<dyn ProfileDirectory>) -> Self {
        Self {
            store,
            profiles,
            validator: CommentValidator::new(),
        }
    }

    /// Apply comment settings
    pub fn with_config(mut self, config: &CommentConfig) -> Self {
        self.validator = CommentValidator::with_max_length(config.max_text_length);
        self
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<dyn CommentStore> {
        &self.store
    }

    /// Create a top-level comment or a reply.
    ///
    /// The expert is optional. A parent other than the top-level sentinel
    /// must be an existing top-level comment.
    pub fn add_comment(&self, req: &AddCommentRequest) -> Result<CommentId> {
        let author = self.validator.require("an author", req.author.as_deref())?;
        let text = self.validator.require("a comment", req.text.as_deref())?;
        let parent_raw = self.validator.require("a parentId", req.parent_id.as_deref())?;
        self.validator.validate_text(text)?;

        let parent = parse_parent_ref(parent_raw);
        let expert = req
            .expert
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from);

        let comment = CommentBuilder::new(author)
            .text(text)
            .maybe_expert(expert)
            .parent(parent)
            .build()?;
        // The parent check and the insert share one store lock
        let id = if comment.is_top_level() {
            self.store.create(comment)?
        } else {
            self.store.create_reply(comment)?
        };

        info!("Added comment {} by {}", id, author);
        Ok(id)
    }

    /// Replace a comment's text when a non-empty one is given
    pub fn update_comment(&self, req: &UpdateCommentRequest) -> Result<()> {
        let id = self.require_id(req.update_id.as_deref())?;
        let text = req.text.as_deref().map(str::trim).filter(|t| !t.is_empty());
        if let Some(text) = text {
            self.validator.validate_text(text)?;
        }

        self.store.update(&id, &mut |comment| {
            if let Some(text) = text {
                comment.update_text(text);
            }
        })?;

        debug!("Updated comment {}", id);
        Ok(())
    }

    /// Toggle the author's like. Returns whether the author now likes it.
    pub fn like_comment(&self, req: &VoteRequest) -> Result<bool> {
        let id = self.require_id(req.id.as_deref())?;
        let voter = self.validator.require("an author", req.author.as_deref())?;

        let mut liked = false;
        self.store.update(&id, &mut |comment| {
            liked = comment.voters.toggle(voter);
            comment.touch();
        })?;

        debug!("Comment {} like by {} -> {}", id, voter, liked);
        Ok(liked)
    }

    /// Remove the author's like if present. Never adds one.
    pub fn dislike_comment(&self, req: &VoteRequest) -> Result<()> {
        let id = self.require_id(req.id.as_deref())?;
        let voter = self.validator.require("an author", req.author.as_deref())?;

        self.store.update(&id, &mut |comment| {
            if comment.voters.remove(voter) {
                comment.touch();
            }
        })?;

        debug!("Comment {} unliked by {}", id, voter);
        Ok(())
    }

    /// Delete a comment and its replies in one store call.
    ///
    /// Returns the number of removed records; zero is not an error.
    pub fn delete_comment(&self, req: &DeleteCommentRequest) -> Result<usize> {
        let id = self.require_id(req.id.as_deref())?;
        let removed = self
            .store
            .delete_where(&|c| c.id == id || c.is_reply_to(&id))?;

        info!("Deleted comment {} ({} records)", id, removed);
        Ok(removed)
    }

    /// Read every thread attached to an expert
    pub fn get_comments(&self, expert_slug: &str) -> Result<Vec<CommentNode>> {
        TreeAssembler::new(self.store.as_ref(), self.profiles.as_ref()).assemble(expert_slug)
    }

    fn require_id(&self, raw: Option<&str>) -> Result<CommentId> {
        self.validator
            .require("a comment id", raw)
            .map(CommentId::from_string)
    }
}
