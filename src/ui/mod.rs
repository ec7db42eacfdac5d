//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into pixels on
//! the terminal.  No file or stream I/O happens here.

pub mod help;
pub mod layout;
pub mod pager;
pub mod status;
pub mod theme;
