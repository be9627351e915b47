//! psyreport-app library root.
//!
//! Re-exports internal modules so that examples and integration tests
//! can exercise the intake commands directly, without going through the
//! command-line layer.

pub mod aws;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod session;
pub mod state;
