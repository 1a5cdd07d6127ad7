//! HTTP boundary of the logging subsystem.
//!
//! The rest of the backend interacts with the logger through this
//! middleware; it produces the log-worthy request events, the logger does
//! the rest.

pub mod middleware;

pub use middleware::log_requests;
