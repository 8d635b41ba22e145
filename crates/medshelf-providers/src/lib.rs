//! HTTP clients for the external providers behind the inventory service.
//!
//! Tavily supplies search evidence for name reconciliation; Gemini reads
//! prescription images and powers the chat assistant. Both clients are
//! blocking; async hosts wrap calls in `spawn_blocking`.

pub mod gemini;
pub mod prompts;
pub mod tavily;

pub use gemini::{AssistantClient, GeminiClient, GeminiError, GeminiResult};
pub use tavily::TavilyClient;
