//! Uniform inference result
//!
//! Whatever vendor served a request, the caller receives an [`InferenceResult`].

use bytes::Bytes;

/// Generated content
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Generated text
    Text(String),
    /// Generated binary content (images)
    Binary {
        /// MIME type of `data`, e.g. `image/png`
        mime_type: String,
        /// Raw bytes
        data: Bytes,
    },
}

impl Payload {
    /// Text content, if this is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Binary { .. } => None,
        }
    }

    /// Whether the payload carries no content
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(text) => text.trim().is_empty(),
            Payload::Binary { data, .. } => data.is_empty(),
        }
    }
}

/// The value returned to the caller regardless of which vendor served it
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    /// Generated content
    pub payload: Payload,
    /// Name of the provider that served the request
    pub provider_name: String,
    /// Model that produced the content
    pub model_id: String,
}

impl InferenceResult {
    /// Create a text result
    pub fn text(
        text: impl Into<String>,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            payload: Payload::Text(text.into()),
            provider_name: provider_name.into(),
            model_id: model_id.into(),
        }
    }

    /// Create a binary result
    pub fn binary(
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            payload: Payload::Binary {
                mime_type: mime_type.into(),
                data: data.into(),
            },
            provider_name: provider_name.into(),
            model_id: model_id.into(),
        }
    }
}
