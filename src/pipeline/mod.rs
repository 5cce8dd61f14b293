//! The resize pipeline: scan -> load -> resize -> save, with progress
//! snapshots published along the way.
//!
//! Everything here is synchronous and GUI-agnostic; the form runs it on
//! a blocking worker and listens on a channel.

pub mod error;
pub mod format;
pub mod loader;
pub mod resizer;
pub mod runner;
pub mod scanner;
