//! LLM provider abstraction for gai.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch. Supports OpenAI, Anthropic, OpenRouter, and Ollama (local) via
//! [`ProviderKind`].

mod client;
mod kind;
mod resolve;

pub use client::Provider;
pub use kind::ProviderKind;
pub use resolve::{resolve_model, ModelSelection};
