//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus `BACKEND_URL`)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seat_console::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Proxying to {}", settings.backend.url);
//! ```

mod settings;

pub use settings::*;
