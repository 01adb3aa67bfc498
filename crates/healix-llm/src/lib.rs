//! # healix-llm
//!
//! The remote half of HEALIX: a `ChatBackend` for any OpenAI-compatible
//! chat completions API (OpenRouter, DeepSeek, local gateways).
//!
//! Requests are streamed. `sse` turns the event stream into accumulated
//! text and `client` handles transport, auth headers and status mapping.
//! Every failure is returned as a `HealixError`; deciding what to do about
//! it is the session's job.

pub mod client;
pub mod sse;

pub use client::ChatCompletionsClient;
pub use sse::{parse_sse_line, SseEvent};
