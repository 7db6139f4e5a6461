//! Shared leaf crate for the prodev workspace.
//!
//! This crate has zero internal dependencies so it can be used by the
//! data layer, the HTTP client crate, and the CLI alike. It holds the
//! shared type aliases, nested JSON value access, the memoization
//! primitives, and environment-driven configuration.

pub mod cache;
pub mod config;
pub mod types;
pub mod value;
