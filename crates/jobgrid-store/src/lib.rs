//! MySQL-backed implementation of the [`JobStore`](jobgrid_query::JobStore)
//! contract.
//!
//! All user-supplied values are bound positionally through
//! [`SqlParam`](jobgrid_query::SqlParam); only code-controlled fragments and
//! pre-validated LIMIT/OFFSET integers are interpolated into SQL text.

pub mod mysql;

pub use mysql::{MySqlJobStore, StoreCapabilities};
