//! # Seat Console Library
//!
//! Admin console support for a team-seat invitation service:
//! - An HTTP proxy that forwards `/api/*` to the backend, with an explicit
//!   public redeem route
//! - A typed async client for the backend's admin and public endpoints,
//!   with CSRF handling and retry for slow operations
//! - View models and reducer-style state for the console's tables
//!
//! ## Architecture
//!
//! - **Domain Layer**: Records mirrored from the backend and pagination types
//! - **Application Layer**: Client, services, view models and state
//! - **Infrastructure Layer**: Upstream HTTP client and metrics
//! - **Presentation Layer**: Proxy routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! seat_console/
//! +-- config/         Configuration management
//! +-- domain/         Entities and pagination value objects
//! +-- application/    Client, services, DTOs, view models, state
//! +-- infrastructure/ Upstream client and Prometheus metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Error envelope
//! ```

// Configuration module
pub mod config;

// Domain layer - backend records
pub mod domain;

// Application layer - console client and state
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP proxy
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
