//! Application state that outlives a single frame:
//! - Persistent form settings (settings.rs)
//! - Per-run bookkeeping and progress snapshots (session.rs)

pub mod session;
pub mod settings;
