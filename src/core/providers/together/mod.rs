//! Together AI Provider
//!
//! OpenAI-compatible chat plus an image endpoint returning base64 payloads.
//! Default pick for research and image requests.
//!
//! Documentation: https://docs.together.ai

pub mod provider;

pub use provider::{DEFAULT_BASE_URL, TogetherProvider};
