//! Request handlers.

pub mod applications;
pub mod health;
pub mod jobs;

pub use applications::*;
pub use health::*;
pub use jobs::*;
