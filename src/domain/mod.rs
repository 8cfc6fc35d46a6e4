//! # Domain Layer
//!
//! Records and value types mirrored from the backend service.
//!
//! ## Structure
//!
//! - **entities**: DTOs for each console table and dashboard snapshot
//! - **value_objects**: Pagination query and response envelope
//!
//! Nothing here enforces business rules. The backend owns them; the
//! console only needs faithful decoding and a few display helpers.

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
