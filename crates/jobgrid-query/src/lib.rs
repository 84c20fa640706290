//! Job listing query engine.
//!
//! Turns loosely-typed request parameters into a deterministic,
//! injection-safe listing query and assembles `{rows, pagination}`
//! responses. The pipeline is stateless:
//!
//! 1. [`normalize`] coerces raw parameters into one canonical
//!    [`FilterCriteria`](jobgrid_models::FilterCriteria) + page + sort;
//! 2. [`compose_filters`] builds an ordered WHERE clause with positional
//!    bind parameters;
//! 3. [`JobQueryEngine`] runs the page and count queries over the same
//!    filter and merges them with pagination metadata.

pub mod compose;
pub mod engine;
pub mod normalize;
pub mod store;

pub use compose::{compose_filters, order_by, SqlFilter, SqlParam};
pub use engine::{JobPage, JobQueryEngine};
pub use normalize::{normalize, MultiParam, NormalizedQuery, RawJobQuery};
pub use store::{JobStore, StoreError, StoreResult};
