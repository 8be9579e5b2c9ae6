//! Comment system module
//!
//! Comment records, vote sets, reply indexing, and validation.

pub mod model;
pub mod votes;
pub mod index;
pub mod validator;
pub mod builder;

pub use model::*;
pub use votes::{VoteSet, Voter};
pub use index::ReplyIndex;
pub use validator::{CommentValidator, MAX_COMMENT_LENGTH};
pub use builder::CommentBuilder;
