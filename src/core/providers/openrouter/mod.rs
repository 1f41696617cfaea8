//! OpenRouter Provider
//!
//! OpenRouter fronts many hosted models behind one OpenAI-compatible API.
//!
//! Documentation: https://openrouter.ai/docs

pub mod provider;

pub use provider::{DEFAULT_BASE_URL, OpenRouterProvider};
