//! Run modes
//!
//! The service has a single mode: the HTTP server.

pub mod server;

pub use server::run_server;
