//! AI Horde wire types

use serde::{Deserialize, Serialize};

/// Body for `POST /generate/text/async`
#[derive(Debug, Serialize)]
pub struct TextJobRequest<'a> {
    pub prompt: &'a str,
    pub params: TextParams,
    pub models: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TextParams {
    pub max_length: u32,
    pub max_context_length: u32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            max_length: 512,
            max_context_length: 2048,
        }
    }
}

/// Body for `POST /generate/async`
#[derive(Debug, Serialize)]
pub struct ImageJobRequest<'a> {
    pub prompt: &'a str,
    pub params: ImageParams,
    pub models: Vec<&'a str>,
    /// Inline base64 results instead of R2 download links
    pub r2: bool,
}

#[derive(Debug, Serialize)]
pub struct ImageParams {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub n: u32,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            steps: 25,
            n: 1,
        }
    }
}

/// Response to a job submission
#[derive(Debug, Deserialize)]
pub struct JobSubmitted {
    pub id: String,
}

/// Job status, shared by text and image jobs
#[derive(Debug, Deserialize)]
pub struct JobStatus {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub faulted: bool,
    #[serde(default = "default_true")]
    pub is_possible: bool,
    #[serde(default)]
    pub generations: Vec<Generation>,
}

fn default_true() -> bool {
    true
}

/// One finished generation; text jobs fill `text`, image jobs fill `img`
#[derive(Debug, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
