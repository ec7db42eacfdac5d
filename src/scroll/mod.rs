//! Smooth scrolling — capability gate, convergence engine, scheduling seam.
//!
//! Nothing in this module depends on any TUI or rendering crate. The engine
//! talks to the outside world through the [`engine::TickScheduler`] trait
//! and plain row numbers, so the whole animation is testable without a
//! terminal.

pub mod engine;
pub mod gate;
