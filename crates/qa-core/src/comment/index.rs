//! Parent-to-replies index over an arena of fetched records

use super::model::Comment;
use crate::types::CommentId;
use std::collections::HashMap;

/// Maps a parent id to the arena positions of its direct replies.
///
/// Built per read; only one level is indexed since replies never have
/// children of their own.
#[derive(Debug, Clone, Default)]
pub struct ReplyIndex {
    by_parent: HashMap<CommentId, Vec<usize>>,
}

impl ReplyIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `arena`, skipping top-level records
    pub fn build(arena: &[Comment]) -> Self {
        let mut index = Self::new();
        for (pos, comment) in arena.iter().enumerate() {
            if let Some(parent) = &comment.parent_id {
                index.by_parent.entry(parent.clone()).or_default().push(pos);
            }
        }
        index
    }

    /// Arena positions of the replies to `parent`
    pub fn replies_of(&self, parent: &CommentId) -> &[usize] {
        self.by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of replies to `parent`
    pub fn reply_count(&self, parent: &CommentId) -> usize {
        self.replies_of(parent).len()
    }
}
