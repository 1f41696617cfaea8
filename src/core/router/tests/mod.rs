//! Router tests module
//!
//! Scenario tests for classification, retry, selection and dispatch.

mod support;
