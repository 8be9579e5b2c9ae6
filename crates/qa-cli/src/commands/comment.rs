//! Comment commands
//!
//! Add, edit, vote on, and delete comments. Each prints the API envelope.

use super::{print_response, AppContext};
use anyhow::Result;
use clap::Args;
use qa_core::api::{AddCommentRequest, DeleteCommentRequest, UpdateCommentRequest, VoteRequest};
use qa_core::store::CommentStore;
use qa_core::types::{CommentId, TOP_LEVEL_SENTINEL};

/// Arguments for the add command
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Expert the thread belongs to
    #[arg(long, short)]
    pub expert: Option<String>,

    /// Author profile slug
    #[arg(long, short)]
    pub author: Option<String>,

    /// Comment text
    #[arg(long, short)]
    pub text: Option<String>,

    /// Comment to answer ("-1" for a new top-level comment)
    #[arg(long, short, default_value = TOP_LEVEL_SENTINEL)]
    pub parent: String,
}

/// Arguments for the update command
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Comment id
    pub id: String,

    /// New text; leaving it out keeps the current text
    #[arg(long, short)]
    pub text: Option<String>,
}

/// Arguments for like and dislike
#[derive(Debug, Args)]
pub struct VoteArgs {
    /// Comment id
    pub id: String,

    /// Voter profile slug
    #[arg(long, short)]
    pub author: String,
}

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Comment id
    pub id: String,

    /// Skip confirmation
    #[arg(long, short)]
    pub yes: bool,
}

pub fn add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let req = AddCommentRequest {
        expert: args.expert,
        author: args.author,
        text: args.text,
        parent_id: Some(args.parent),
    };
    print_response(&ctx.api()?.add_comment(&req))
}

pub fn update(ctx: &AppContext, args: UpdateArgs) -> Result<()> {
    let req = UpdateCommentRequest {
        update_id: Some(args.id),
        text: args.text,
    };
    print_response(&ctx.api()?.update_comment(&req))
}

pub fn like(ctx: &AppContext, args: VoteArgs) -> Result<()> {
    print_response(&ctx.api()?.like_comment(&vote_request(args)))
}

pub fn dislike(ctx: &AppContext, args: VoteArgs) -> Result<()> {
    print_response(&ctx.api()?.dislike_comment(&vote_request(args)))
}

fn vote_request(args: VoteArgs) -> VoteRequest {
    VoteRequest {
        id: Some(args.id),
        author: Some(args.author),
    }
}

pub fn delete(ctx: &AppContext, args: DeleteArgs) -> Result<()> {
    use colored::Colorize;

    let api = ctx.api()?;

    if !args.yes {
        use dialoguer::Confirm;

        let id = CommentId::from_string(args.id.as_str());
        let answers = api
            .service()
            .store()
            .find_where(&|c| c.is_reply_to(&id))?
            .len();
        println!("Comment: {}", args.id.green());
        println!("  {} answers will be deleted with it", answers);

        let confirmed = Confirm::new()
            .with_prompt("Delete this comment?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    print_response(&api.delete_comment(&DeleteCommentRequest { id: Some(args.id) }))
}
