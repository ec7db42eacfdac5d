//! Core data structures – document content, wrap layout, scroll viewport.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod document;
pub mod source;
pub mod viewport;
