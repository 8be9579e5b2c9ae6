//! File system storage for comments

use crate::json_file::{read_records, write_records, CollectionLock};
use qa_core::comment::Comment;
use qa_core::error::{QaError, Result};
use qa_core::store::{ensure_answerable, CommentStore, Predicate};
use qa_core::types::CommentId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Comments collection file name
const COMMENTS_FILE: &str = "comments.json";

/// File system based comment storage.
///
/// All records live in one collection file that is rewritten atomically on
/// every change. Each operation holds an OS advisory lock on the collection
/// for its whole read-modify-write cycle, so cascading deletes, reply
/// inserts, and vote updates stay atomic across handles and processes
/// sharing the directory.
pub struct FileSystemStore {
    /// Collection file
    comments_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_dir(&base_dir)?;

        Ok(Self {
            comments_path: base_dir.join(COMMENTS_FILE),
        })
    }

    fn read_locked(&self) -> Result<Vec<Comment>> {
        let _lock = CollectionLock::shared(&self.comments_path)?;
        read_records(&self.comments_path)
    }

    /// Run `change` on the loaded collection under the exclusive lock,
    /// writing back only when it reports a change
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<Comment>) -> Result<(T, bool)>,
    ) -> Result<T> {
        let _lock = CollectionLock::exclusive(&self.comments_path)?;
        let mut comments = read_records(&self.comments_path)?;
        let (out, dirty) = change(&mut comments)?;
        if dirty {
            write_records(&self.comments_path, &comments)?;
        }
        Ok(out)
    }
}

fn insert(comments: &mut Vec<Comment>, comment: Comment) -> Result<(CommentId, bool)> {
    if comments.iter().any(|c| c.id == comment.id) {
        return Err(QaError::Validation(format!(
            "Comment with ID {} already exists",
            comment.id
        )));
    }
    let id = comment.id.clone();
    comments.push(comment);
    Ok((id, true))
}

/// Platform data directory for qa-threads
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "qa-threads", "qa-threads")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".qa-threads")
        })
}

/// Ensure a storage directory exists
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            QaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create storage directory: {}", e),
            ))
        })?;
        debug!("Created storage directory: {:?}", dir);
    }
    Ok(())
}

impl CommentStore for FileSystemStore {
    fn create(&self, comment: Comment) -> Result<CommentId> {
        let id = self.modify(|comments| insert(comments, comment))?;
        debug!("Created comment {} in {:?}", id, self.comments_path);
        Ok(id)
    }

    fn create_reply(&self, reply: Comment) -> Result<CommentId> {
        let id = self.modify(|comments| {
            if let Some(parent_id) = &reply.parent_id {
                let parent = comments
                    .iter()
                    .find(|c| &c.id == parent_id)
                    .ok_or_else(|| QaError::CommentNotFound(parent_id.to_string()))?;
                ensure_answerable(parent)?;
            }
            insert(comments, reply)
        })?;
        debug!("Created reply {} in {:?}", id, self.comments_path);
        Ok(id)
    }

    fn find_by_id(&self, id: &CommentId) -> Result<Comment> {
        self.read_locked()?
            .into_iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| QaError::CommentNotFound(id.to_string()))
    }

    fn find_where(&self, predicate: Predicate<'_>) -> Result<Vec<Comment>> {
        Ok(self
            .read_locked()?
            .into_iter()
            .filter(|c| predicate(c))
            .collect())
    }

    fn save(&self, comment: &Comment) -> Result<()> {
        self.modify(|comments| {
            let slot = comments
                .iter_mut()
                .find(|c| c.id == comment.id)
                .ok_or_else(|| QaError::CommentNotFound(comment.id.to_string()))?;
            *slot = comment.clone();
            Ok(((), true))
        })
    }

    fn delete_by_id(&self, id: &CommentId) -> Result<()> {
        self.modify(|comments| {
            let pos = comments
                .iter()
                .position(|c| &c.id == id)
                .ok_or_else(|| QaError::CommentNotFound(id.to_string()))?;
            comments.remove(pos);
            Ok(((), true))
        })?;
        debug!("Deleted comment {} from {:?}", id, self.comments_path);
        Ok(())
    }

    fn delete_where(&self, predicate: Predicate<'_>) -> Result<usize> {
        self.modify(|comments| {
            let before = comments.len();
            comments.retain(|c| !predicate(c));
            let removed = before - comments.len();
            Ok((removed, removed > 0))
        })
    }

    fn update(&self, id: &CommentId, mutate: &mut dyn FnMut(&mut Comment)) -> Result<Comment> {
        self.modify(|comments| {
            let comment = comments
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| QaError::CommentNotFound(id.to_string()))?;
            mutate(comment);
            Ok((comment.clone(), true))
        })
    }
}
