//! The summarisation flow shared by the CLI commands.
//!
//! One request runs at a time, strictly sequenced: credential check, page
//! extraction, prompt build, API call, formatting. The first failure aborts
//! the flow; nothing is retried.

use thiserror::Error;

use crate::format::{self, SummaryResult};
use crate::gemini::{ApiError, GeminiClient};
use crate::prompt;
use crate::scraper::{self, ScraperError};
use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("failed to extract page content: {0}")]
    Extraction(#[from] ScraperError),
    #[error("summary request failed: {0}")]
    Api(#[from] ApiError),
}

impl SummarizeError {
    /// The short message shown to the user. Never includes the API key.
    pub fn user_message(&self) -> &'static str {
        match self {
            SummarizeError::MissingApiKey => {
                "Please set your Gemini API Key in the settings first."
            }
            SummarizeError::Extraction(_) => "Error extracting page content.",
            SummarizeError::Api(_) => {
                "Error: Failed to generate summary with Gemini. Check your API key and try again."
            }
        }
    }
}

/// Stage notifications for the UI's status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Extracting,
    Requesting { content_len: usize },
}

/// Summarise the page at `url`.
///
/// Returns before any network activity when no API key is configured. The
/// `progress` callback fires as each stage starts, letting the caller drive
/// its status display.
pub async fn summarize_url(
    url: &str,
    settings: &Settings,
    client: &GeminiClient,
    mut progress: impl FnMut(Progress),
) -> Result<SummaryResult, SummarizeError> {
    if settings.api_key.is_empty() {
        return Err(SummarizeError::MissingApiKey);
    }

    progress(Progress::Extracting);
    let page = scraper::fetch_page(url).await?;

    let request = prompt::build_summary_prompt(&page, settings.summary_length);

    progress(Progress::Requesting {
        content_len: page.content.chars().count(),
    });
    let summary_text = client.generate(&request, &settings.api_key).await?;

    Ok(format::format_summary(&page, &summary_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_match_the_ui_wording() {
        assert_eq!(
            SummarizeError::MissingApiKey.user_message(),
            "Please set your Gemini API Key in the settings first."
        );
        assert_eq!(
            SummarizeError::Api(ApiError::MissingText).user_message(),
            "Error: Failed to generate summary with Gemini. Check your API key and try again."
        );
    }
}
