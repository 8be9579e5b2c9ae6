//! Vote set with toggle and forced-remove semantics

use serde::{Deserialize, Serialize};

/// A single like, recorded by the voter's slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voter {
    pub slug: String,
}

impl Voter {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

/// Set of voters on one comment.
///
/// Backed by a `Vec` to keep the legacy `[{"slug": ..}]` wire shape; every
/// mutation keeps slugs unique and loading collapses duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Voter>", into = "Vec<Voter>")]
pub struct VoteSet {
    voters: Vec<Voter>,
}

impl VoteSet {
    /// Create an empty vote set
    pub fn new() -> Self {
        Self::default()
    }

    /// Like if absent, un-like if present.
    ///
    /// Returns `true` when the voter holds a vote afterwards.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if self.remove(slug) {
            false
        } else {
            self.voters.push(Voter::new(slug));
            true
        }
    }

    /// Drop the voter's vote if there is one. Never adds.
    ///
    /// Returns `true` when a vote was removed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.voters.len();
        self.voters.retain(|v| v.slug != slug);
        self.voters.len() != before
    }

    /// Check whether a voter currently holds a vote
    pub fn contains(&self, slug: &str) -> bool {
        self.voters.iter().any(|v| v.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voter> {
        self.voters.iter()
    }
}

impl From<Vec<Voter>> for VoteSet {
    fn from(voters: Vec<Voter>) -> Self {
        let mut set = VoteSet::new();
        for voter in voters {
            if !set.contains(&voter.slug) {
                set.voters.push(voter);
            }
        }
        set
    }
}

impl From<VoteSet> for Vec<Voter> {
    fn from(set: VoteSet) -> Self {
        set.voters
    }
}
