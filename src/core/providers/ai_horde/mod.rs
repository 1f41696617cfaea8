//! AI Horde Provider
//!
//! Crowd-sourced generation through an asynchronous job API: submit a job,
//! then poll its status until a worker finishes it. Works without an account
//! using the anonymous key.
//!
//! Documentation: https://stablehorde.net/api

pub mod models;
pub mod provider;

pub use provider::{ANONYMOUS_API_KEY, AiHordeProvider, DEFAULT_BASE_URL};
