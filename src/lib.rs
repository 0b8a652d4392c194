//! # Pagebrief
//!
//! A CLI for summarising webpages with the Gemini API.
//!
//! ## How it works
//!
//! - **Extraction**: fetches the page and pulls the readable content
//!   (articles first, then main-content containers, then paragraphs)
//! - **Prompting**: builds a single instruction string from the page record
//!   and the configured summary length
//! - **Generation**: one non-streaming `generateContent` call per request
//! - **Settings**: API key and summary length persist in a local sled store

pub mod app;
pub mod format;
pub mod gemini;
pub mod prompt;
pub mod scraper;
pub mod settings;

pub use format::SummaryResult;
pub use gemini::GeminiClient;
pub use scraper::PageRecord;
pub use settings::{Settings, SettingsStore, SummaryLength};
