//! Read-side assembly of comment threads
//!
//! Rebuilds the two-level tree (top-level comments and their answers) from
//! the flat store and enriches every node with its author's display fields.

use crate::comment::{Comment, ReplyIndex, VoteSet};
use crate::error::Result;
use crate::profile::{Profile, ProfileDirectory};
use crate::store::CommentStore;
use crate::types::CommentId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A reply as returned to readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerNode {
    pub id: CommentId,
    pub author_id: String,
    pub text: String,
    pub voters: VoteSet,
    pub author_name: Option<String>,
    pub profile_image: Option<String>,
}

/// A top-level comment with its answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: CommentId,
    pub author_id: String,
    pub text: String,
    pub voters: VoteSet,
    pub answers: Vec<AnswerNode>,
    pub author_name: Option<String>,
    pub profile_image: Option<String>,
}

/// Author display fields, both absent for unknown authors
#[derive(Debug, Clone, Default)]
struct AuthorFields {
    name: Option<String>,
    image: Option<String>,
}

impl From<Option<Profile>> for AuthorFields {
    fn from(profile: Option<Profile>) -> Self {
        match profile {
            Some(p) => Self {
                name: p.profile,
                image: p.profile_image,
            },
            None => Self::default(),
        }
    }
}

/// Per-read memo so each author slug hits the directory once
struct AuthorCache<'a> {
    directory: &'a dyn ProfileDirectory,
    resolved: HashMap<String, AuthorFields>,
}

impl<'a> AuthorCache<'a> {
    fn new(directory: &'a dyn ProfileDirectory) -> Self {
        Self {
            directory,
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, slug: &str) -> Result<AuthorFields> {
        if let Some(fields) = self.resolved.get(slug) {
            return Ok(fields.clone());
        }
        let fields = AuthorFields::from(self.directory.find_by_slug(slug)?);
        self.resolved.insert(slug.to_string(), fields.clone());
        Ok(fields)
    }
}

/// Joins comments, replies, and profiles into reader-facing threads
pub struct TreeAssembler<'a> {
    store: &'a dyn CommentStore,
    profiles: &'a dyn ProfileDirectory,
}

impl<'a> TreeAssembler<'a> {
    pub fn new(store: &'a dyn CommentStore, profiles: &'a dyn ProfileDirectory) -> Self {
        Self { store, profiles }
    }

    /// Build every thread attached to `expert_slug`.
    ///
    /// Any store or profile fault aborts the whole read.
    pub fn assemble(&self, expert_slug: &str) -> Result<Vec<CommentNode>> {
        let mut roots = self
            .store
            .find_where(&|c: &Comment| c.is_thread_root_for(expert_slug))?;
        roots.sort_by_key(|c| c.created_at);

        let root_ids: HashSet<CommentId> = roots.iter().map(|c| c.id.clone()).collect();
        let mut arena = self.store.find_where(&|c: &Comment| {
            c.parent_id
                .as_ref()
                .is_some_and(|parent| root_ids.contains(parent))
        })?;
        arena.sort_by_key(|c| c.created_at);
        let index = ReplyIndex::build(&arena);

        let mut authors = AuthorCache::new(self.profiles);
        let mut threads = Vec::with_capacity(roots.len());

        for root in roots {
            let mut answers = Vec::with_capacity(index.reply_count(&root.id));
            for &pos in index.replies_of(&root.id) {
                let reply = &arena[pos];
                let author = authors.resolve(&reply.author_slug)?;
                answers.push(AnswerNode {
                    id: reply.id.clone(),
                    author_id: reply.author_slug.clone(),
                    text: reply.text.clone(),
                    voters: reply.voters.clone(),
                    author_name: author.name,
                    profile_image: author.image,
                });
            }

            let author = authors.resolve(&root.author_slug)?;
            threads.push(CommentNode {
                id: root.id,
                author_id: root.author_slug,
                text: root.text,
                voters: root.voters,
                answers,
                author_name: author.name,
                profile_image: author.image,
            });
        }

        debug!(
            "Assembled {} threads with {} answers for expert {}",
            threads.len(),
            arena.len(),
            expert_slug
        );
        Ok(threads)
    }
}
