//! HuggingFace Inference API Provider
//!
//! Text models answer with `[{ "generated_text": ... }]`; diffusion models
//! answer with raw image bytes.
//!
//! Documentation: https://huggingface.co/docs/api-inference

pub mod provider;

pub use provider::{DEFAULT_BASE_URL, HuggingFaceProvider};
