//! qa-threads - comment threads for expert Q&A
//!
//! Questions are attached to an expert, answers attach to a question,
//! and readers like the ones they find useful.
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize in your project
//! qa-threads init
//!
//! # Ask a question on an expert's page
//! qa-threads add --expert jane --author ada --text "How do I start?"
//!
//! # Answer it
//! qa-threads add --expert jane --author jane --text "Read the docs" --parent <id>
//!
//! # Read the threads
//! qa-threads list jane
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
