//! Application orchestration — state management, event plumbing, and input handling.

pub mod event;
pub mod feed;
pub mod handler;
pub mod state;
