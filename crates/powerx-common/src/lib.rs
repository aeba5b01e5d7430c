//! PowerX Common - Shared types for the organization services
//!
//! This crate provides the foundational types used across all PowerX components:
//! - Error taxonomy and error codes
//! - Pagination models

pub mod error;
pub mod page;

// Re-exports for convenience
pub use error::{ErrorCode, OrgError, OrgResult};
pub use page::{Page, PageOption};
