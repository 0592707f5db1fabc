//! Google Gemini API client.
//!
//! Implements `TextGenerationProvider` for Gemini models via the
//! Generative Language API, including the code execution tool.

mod api;
mod client;
mod config;


pub use client::GeminiClient;
pub use config::GeminiConfig;
