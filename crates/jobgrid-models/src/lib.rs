//! Shared data models for the JobGrid backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job postings and their status vocabulary
//! - Listing filters and sort keys
//! - Offset pagination requests and metadata
//! - Job applications

pub mod application;
pub mod filter;
pub mod pagination;
pub mod posting;

// Re-export common types
pub use application::{ApplicationStats, ApplyRequest};
pub use filter::{FilterCriteria, SortKey, StatusBucket};
pub use pagination::{PageRequest, PaginationMeta, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use posting::{JobPosting, JobStatus, PostingError};
