//! Context builder.
//!
//! Turns a user message, prior turns, project instructions and memories
//! into the single query string sent upstream.

mod builder;

pub use builder::{
    ContextBudget, DEFAULT_MAX_CONTEXT_CHARS, DEFAULT_MIN_CONTEXT_LINES, build_query,
};
