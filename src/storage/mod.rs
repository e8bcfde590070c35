//! Storage layer for dataharvest
//!
//! S3 transfer, a TTL cache for listings, and delta detection over local
//! directories.

pub mod cache;
pub mod delta;
pub mod s3;

pub use cache::ListingCache;
pub use delta::{DeltaDetector, DeltaReport};
pub use s3::S3Manager;
