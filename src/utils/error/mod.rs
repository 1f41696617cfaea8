//! Error handling for the Gateway
//!
//! Per-attempt provider failures never reach this layer; the router absorbs
//! them and surfaces only a terminal [`DispatchError`](crate::core::router::DispatchError).

mod helpers;
mod response;
mod types;

pub use response::{ErrorResponse, dispatch_status};
pub use types::{GatewayError, Result};
