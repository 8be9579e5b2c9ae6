//! qa-core - Core library for qa-threads
//!
//! Comment threads attached to experts: top-level comments, one level of
//! answers, toggle likes, cascading deletes, and the read path that
//! assembles threads with author display fields.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod store;
pub mod profile;
pub mod tree;
pub mod service;
pub mod api;

pub use error::{ErrorKind, QaError, Result};
pub use types::*;
pub use api::CommentApi;
pub use service::CommentService;
