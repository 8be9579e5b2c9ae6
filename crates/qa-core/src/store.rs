//! Comment storage trait and the in-memory backend

use crate::comment::Comment;
use crate::error::{QaError, Result};
use crate::types::CommentId;

/// Record filter passed to the predicate-based store operations
pub type Predicate<'a> = &'a dyn Fn(&Comment) -> bool;

/// Trait for comment storage implementations.
///
/// The store is a flat collection keyed by id. It does not enforce parent
/// links; callers keep replies consistent on delete.
pub trait CommentStore: Send + Sync {
    /// Insert a new record and return its id
    fn create(&self, comment: Comment) -> Result<CommentId>;

    /// Insert a reply once its parent is confirmed to be an existing
    /// top-level record. A top-level `reply` is inserted as is.
    ///
    /// This default checks and inserts in two steps, so a concurrent delete
    /// of the parent can leave an orphan. Backends with a write lock should
    /// override it.
    fn create_reply(&self, reply: Comment) -> Result<CommentId> {
        if let Some(parent) = &reply.parent_id {
            ensure_answerable(&self.find_by_id(parent)?)?;
        }
        self.create(reply)
    }

    /// Load a record by id
    fn find_by_id(&self, id: &CommentId) -> Result<Comment>;

    /// Load every record matching `predicate`, in backend order
    fn find_where(&self, predicate: Predicate<'_>) -> Result<Vec<Comment>>;

    /// Overwrite an existing record
    fn save(&self, comment: &Comment) -> Result<()>;

    /// Delete a single record
    fn delete_by_id(&self, id: &CommentId) -> Result<()>;

    /// Delete every record matching `predicate`, returning how many went
    fn delete_where(&self, predicate: Predicate<'_>) -> Result<usize>;

    /// Find, mutate, and save a record.
    ///
    /// This default is not atomic: two concurrent updates of the same
    /// record can lose one of the writes. Backends that can hold a write
    /// lock across the sequence should override it.
    fn update(&self, id: &CommentId, mutate: &mut dyn FnMut(&mut Comment)) -> Result<Comment> {
        let mut comment = self.find_by_id(id)?;
        mutate(&mut comment);
        self.save(&comment)?;
        Ok(comment)
    }

    /// Count all records
    fn count(&self) -> Result<usize> {
        Ok(self.find_where(&|_| true)?.len())
    }
}

/// Reject answering a record that is itself a reply
pub fn ensure_answerable(parent: &Comment) -> Result<()> {
    if parent.is_top_level() {
        Ok(())
    } else {
        Err(QaError::Validation(format!(
            "Comment {} is a reply and cannot be answered",
            parent.id
        )))
    }
}

/// In-memory comment storage
pub mod memory {
    use super::*;
    use std::sync::{PoisonError, RwLock};

    fn poisoned<T>(_: PoisonError<T>) -> QaError {
        QaError::Storage("comment store lock poisoned".to_string())
    }

    /// In-memory comment storage, records kept in insertion order
    #[derive(Default)]
    pub struct MemoryCommentStore {
        comments: RwLock<Vec<Comment>>,
    }

    impl MemoryCommentStore {
        /// Create a new in-memory storage
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn insert(comments: &mut Vec<Comment>, comment: Comment) -> Result<CommentId> {
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(QaError::Validation(format!(
                "Comment with ID {} already exists",
                comment.id
            )));
        }
        let id = comment.id.clone();
        comments.push(comment);
        Ok(id)
    }

    impl CommentStore for MemoryCommentStore {
        fn create(&self, comment: Comment) -> Result<CommentId> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            insert(&mut comments, comment)
        }

        fn create_reply(&self, reply: Comment) -> Result<CommentId> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            if let Some(parent_id) = &reply.parent_id {
                let parent = comments
                    .iter()
                    .find(|c| &c.id == parent_id)
                    .ok_or_else(|| QaError::CommentNotFound(parent_id.to_string()))?;
                ensure_answerable(parent)?;
            }
            insert(&mut comments, reply)
        }

        fn find_by_id(&self, id: &CommentId) -> Result<Comment> {
            let comments = self.comments.read().map_err(poisoned)?;
            comments
                .iter()
                .find(|c| &c.id == id)
                .cloned()
                .ok_or_else(|| QaError::CommentNotFound(id.to_string()))
        }

        fn find_where(&self, predicate: Predicate<'_>) -> Result<Vec<Comment>> {
            let comments = self.comments.read().map_err(poisoned)?;
            Ok(comments.iter().filter(|c| predicate(c)).cloned().collect())
        }

        fn save(&self, comment: &Comment) -> Result<()> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            let slot = comments
                .iter_mut()
                .find(|c| c.id == comment.id)
                .ok_or_else(|| QaError::CommentNotFound(comment.id.to_string()))?;
            *slot = comment.clone();
            Ok(())
        }

        fn delete_by_id(&self, id: &CommentId) -> Result<()> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            let pos = comments
                .iter()
                .position(|c| &c.id == id)
                .ok_or_else(|| QaError::CommentNotFound(id.to_string()))?;
            comments.remove(pos);
            Ok(())
        }

        fn delete_where(&self, predicate: Predicate<'_>) -> Result<usize> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            let before = comments.len();
            comments.retain(|c| !predicate(c));
            Ok(before - comments.len())
        }

        fn update(
            &self,
            id: &CommentId,
            mutate: &mut dyn FnMut(&mut Comment),
        ) -> Result<Comment> {
            let mut comments = self.comments.write().map_err(poisoned)?;
            let comment = comments
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| QaError::CommentNotFound(id.to_string()))?;
            mutate(comment);
            Ok(comment.clone())
        }

        fn count(&self) -> Result<usize> {
            Ok(self.comments.read().map_err(poisoned)?.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryCommentStore;
    use super::*;
    use crate::comment::CommentBuilder;

    fn comment(text: &str) -> Comment {
        CommentBuilder::new("u1").text(text).expert("e1").build().unwrap()
    }

    fn reply(parent: &CommentId) -> Comment {
        CommentBuilder::new("u2")
            .text("answer")
            .reply_to(parent.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_and_find() {
        let store = MemoryCommentStore::new();
        let c = comment("hello");
        let id = store.create(c.clone()).unwrap();

        assert_eq!(id, c.id);
        assert_eq!(store.find_by_id(&id).unwrap(), c);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_create_fails() {
        let store = MemoryCommentStore::new();
        let c = comment("hello");
        store.create(c.clone()).unwrap();
        assert!(matches!(store.create(c), Err(QaError::Validation(_))));
    }

    #[test]
    fn test_create_reply_checks_parent() {
        let store = MemoryCommentStore::new();
        let root = comment("q");
        store.create(root.clone()).unwrap();

        let answer = reply(&root.id);
        store.create_reply(answer.clone()).unwrap();

        let missing = reply(&CommentId::from_string("gone"));
        assert!(matches!(
            store.create_reply(missing),
            Err(QaError::CommentNotFound(_))
        ));
        assert!(matches!(
            store.create_reply(reply(&answer.id)),
            Err(QaError::Validation(_))
        ));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_create_reply_races_parent_delete_without_orphans() {
        for _ in 0..20 {
            let store = MemoryCommentStore::new();
            let root = comment("q");
            store.create(root.clone()).unwrap();

            std::thread::scope(|scope| {
                scope.spawn(|| {
                    for _ in 0..10 {
                        let _ = store.create_reply(reply(&root.id));
                    }
                });
                scope.spawn(|| {
                    store
                        .delete_where(&|c| c.id == root.id || c.is_reply_to(&root.id))
                        .unwrap();
                });
            });

            let orphans = store
                .find_where(&|c| !c.is_top_level())
                .unwrap()
                .into_iter()
                .filter(|c| store.find_by_id(c.parent_id.as_ref().unwrap()).is_err())
                .count();
            assert_eq!(orphans, 0);
        }
    }

    #[test]
    fn test_find_missing() {
        let store = MemoryCommentStore::new();
        let result = store.find_by_id(&CommentId::from_string("nope"));
        assert!(matches!(result, Err(QaError::CommentNotFound(_))));
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryCommentStore::new();
        let mut c = comment("before");
        store.create(c.clone()).unwrap();

        c.update_text("after");
        store.save(&c).unwrap();
        assert_eq!(store.find_by_id(&c.id).unwrap().text, "after");
    }

    #[test]
    fn test_save_unknown_fails() {
        let store = MemoryCommentStore::new();
        assert!(matches!(
            store.save(&comment("ghost")),
            Err(QaError::CommentNotFound(_))
        ));
    }

    #[test]
    fn test_find_where_keeps_insertion_order() {
        let store = MemoryCommentStore::new();
        for text in ["a", "b", "c"] {
            store.create(comment(text)).unwrap();
        }
        let texts: Vec<_> = store
            .find_where(&|c| c.text != "b")
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_delete_by_id() {
        let store = MemoryCommentStore::new();
        let c = comment("x");
        store.create(c.clone()).unwrap();
        store.delete_by_id(&c.id).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.delete_by_id(&c.id).is_err());
    }

    #[test]
    fn test_delete_where() {
        let store = MemoryCommentStore::new();
        store.create(comment("keep")).unwrap();
        store.create(comment("drop")).unwrap();
        store.create(comment("drop")).unwrap();

        assert_eq!(store.delete_where(&|c| c.text == "drop").unwrap(), 2);
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.delete_where(&|c| c.text == "drop").unwrap(), 0);
    }

    #[test]
    fn test_update_in_place() {
        let store = MemoryCommentStore::new();
        let c = comment("x");
        store.create(c.clone()).unwrap();

        let updated = store.update(&c.id, &mut |c| {
            c.voters.toggle("u9");
        })
        .unwrap();
        assert!(updated.voters.contains("u9"));
        assert!(store.find_by_id(&c.id).unwrap().voters.contains("u9"));
    }
}
