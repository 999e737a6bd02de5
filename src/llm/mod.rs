//! Language-model backend: the Gemini JSON client and reply cleanup.

pub mod client;
mod json;
mod types;

pub use client::{GeminiClient, GenerateJson, LlmError};
