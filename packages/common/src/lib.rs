//! Common infrastructure for the certgen workspace
//!
//! This crate provides shared functionality used across certgen crates:
//! - Structured logging setup and event helpers
//! - Certificate fingerprint formatting

pub mod error;
pub mod fingerprint;

pub use error::LoggingTransformer;
pub use fingerprint::{colon_hex, sha256_fingerprint};
