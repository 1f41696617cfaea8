//! Core functionality for the Gateway
//!
//! Request and result types, vendor adapters, and the routing layer that
//! retries and fails over between them.

pub mod providers;
pub mod router;
pub mod types;
