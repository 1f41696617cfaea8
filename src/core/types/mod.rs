//! Core request and result types shared by providers and the router

pub mod mode;
pub mod request;
pub mod result;

pub use mode::{RequestMode, UnknownModeError};
pub use request::InferenceRequest;
pub use result::{InferenceResult, Payload};
