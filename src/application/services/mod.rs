//! Application Services
//!
//! Typed wrappers over the backend endpoints the console calls.
//!
//! ## Available Services
//!
//! - **AuthService**: Admin login, logout and session check
//! - **AdminService**: Mothers, codes, logs, jobs, dashboard snapshots, batch actions
//! - **UserService**: Invite table, resend/cancel/remove
//! - **RedeemService**: Public code redemption

pub mod admin_service;
pub mod auth_service;
pub mod redeem_service;
pub mod user_service;

pub use admin_service::{AdminService, AdminServiceImpl};
pub use auth_service::{AuthService, AuthServiceImpl};
pub use redeem_service::{RedeemService, RedeemServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
