//! View Models
//!
//! Loading, query and refresh state that sits between the services and
//! whatever renders the tables.

pub mod auto_refresh;
pub mod batch_actions;
pub mod paginated_query;

pub use auto_refresh::{AutoRefresh, RefreshGate};
pub use batch_actions::BatchActionsCache;
pub use paginated_query::{page_source_fn, FnPageSource, PageSource, PageView, PaginatedQuery};
