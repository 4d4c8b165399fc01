//! Google Gemini summarization client for Glimpse.
//!
//! Implements the [`Summarizer`](glimpse_protocols::Summarizer) contract
//! over the `generateContent` endpoint: one outbound POST per request, the
//! credential as a query parameter, no retries, and every failure mode
//! resolved to a displayable string at the boundary.

mod client;
mod summarizer;
mod types;

pub use client::GeminiClient;
pub use summarizer::GeminiSummarizer;
pub use types::{GenerateContentRequest, GenerateContentResponse};
