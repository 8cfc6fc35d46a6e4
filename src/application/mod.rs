//! Application Layer
//!
//! The console side of the system: a typed client for the backend's admin
//! and public endpoints, the services built on it, and the view models and
//! state containers a renderer drives.

pub mod client;
pub mod dto;
pub mod services;
pub mod state;
pub mod view;
