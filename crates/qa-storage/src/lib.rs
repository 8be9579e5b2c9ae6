//! qa-storage - Storage library for qa-threads
//!
//! JSON file backends for the comment store and the profile directory.

mod comment_store;
pub mod json_file;
mod profile_store;

pub use comment_store::{default_data_dir, FileSystemStore};
pub use profile_store::FileSystemProfiles;
