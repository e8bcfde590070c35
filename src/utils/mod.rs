//! Utility modules for dataharvest
//!
//! - **error**: crate-wide error type and `Result` alias
//! - **files**: content digests and directory walks
//! - **logging**: tracing subscriber setup for binaries
//! - **validation**: shared input validators

pub mod error;
pub mod files;
pub mod logging;
pub mod validation;

pub use error::{HarvestError, Result};
pub use files::{file_digest, list_files};
pub use validation::{is_valid_email, is_valid_json, is_valid_url};
