//! Backend HTTP Wrappers
//!
//! Fetch-based bindings to the chores endpoints, organized by concern.

mod http;
mod records;

pub use http::*;
pub use records::*;
