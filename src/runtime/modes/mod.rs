//! Execution modes
//!
//! - Server mode (HTTP server, the default)
//! - CLI mode (one-shot link management against the local store)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
