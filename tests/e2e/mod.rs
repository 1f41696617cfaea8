//! End-to-end tests against live vendor APIs
//!
//! Ignored by default. Run with real keys in the environment:
//! `OPENROUTER_API_KEY=... cargo test -- --ignored`

pub mod live_dispatch;
