//! View State
//!
//! Reducer-style containers, one per console area. Each owns its data and
//! changes only through `reduce`, so any renderer can drive it from the
//! results of the service calls.

pub mod admin;
pub mod auth;
pub mod bulk_import;
pub mod pool;
pub mod table;
pub mod users;

pub use admin::{AdminAction, AdminState};
pub use auth::{AuthAction, AuthPhase};
pub use bulk_import::{parse_import, ImportAction, ImportPhase, ImportPreview, RejectedLine};
pub use pool::{PoolAction, PoolState};
pub use table::{TableAction, TableState};
pub use users::{UsersAction, UsersState};

/// A state container that advances by folding in actions.
pub trait Reducer {
    type Action;

    fn reduce(&mut self, action: Self::Action);
}
