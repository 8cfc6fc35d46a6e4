//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **PageQuery / Paginated**: table pagination conventions shared by every list endpoint

mod pagination;

pub use pagination::*;
