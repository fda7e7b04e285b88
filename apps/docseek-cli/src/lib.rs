//! docseek-cli
//!
//! Glue for the `docseek` binary: the per-run [`context::RunContext`], the
//! result presenter and the interactive query session.

pub mod context;
pub mod presenter;
pub mod session;

pub use context::RunContext;
pub use session::run_session;
