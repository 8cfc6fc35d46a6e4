//! Presentation Layer
//!
//! HTTP routes, handlers and the middleware stack around them.

pub mod http;
pub mod middleware;
