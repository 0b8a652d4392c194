//! Page fetching and readable-content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this tool
const USER_AGENT: &str = concat!(
    "pagebrief/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/pagebrief)"
);

/// Default timeout for page fetches
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on extracted content, to keep prompts within API limits
const MAX_CONTENT_CHARS: usize = 20_000;

/// Appended when the content had to be cut
const TRUNCATION_MARKER: &str = "...";

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref ARTICLE: Selector = Selector::parse("article").unwrap();
    static ref MAIN_CONTENT: Selector =
        Selector::parse("main, #content, .content, #main, .main").unwrap();
    static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
    static ref META: Selector = Selector::parse("meta").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
}

/// Structured extraction of a webpage, the input to prompt building.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Page title, empty when the document has none
    pub title: String,
    /// Main text content, truncated to [`MAX_CONTENT_CHARS`]
    pub content: String,
    /// The URL the page was fetched from
    pub url: String,
    /// name/property -> content pairs from the page's meta tags
    pub metadata: HashMap<String, String>,
}

/// Create a configured HTTP client for page fetches
fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch a URL and extract its readable content.
///
/// An unreachable page (network failure or non-success status) is a
/// [`ScraperError::FetchError`]; a page with nothing extractable still yields
/// a record with empty content.
pub async fn fetch_page(url: &str) -> Result<PageRecord, ScraperError> {
    let client = create_client()?;

    let response = client.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    let document = Html::parse_document(&html);

    Ok(extract_page(&document, url))
}

/// Extract a [`PageRecord`] from a parsed document.
///
/// Content source priority: `<article>` elements, then the conventional
/// main-content containers, then plain paragraphs. The first selector set
/// with non-empty text wins.
pub fn extract_page(document: &Html, url: &str) -> PageRecord {
    let title = document
        .select(&TITLE)
        .next()
        .map(|el| inner_text(&el))
        .unwrap_or_default();

    let mut content = collect_text(document, &ARTICLE);
    if content.is_empty() {
        content = collect_text(document, &MAIN_CONTENT);
    }
    if content.is_empty() {
        content = collect_text(document, &PARAGRAPH);
    }

    PageRecord {
        title,
        content: truncate_content(&content),
        url: url.to_string(),
        metadata: extract_metadata(document),
    }
}

/// Concatenate the inner text of every element matching the selector,
/// one element per line.
fn collect_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(|el| inner_text(&el))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whitespace-normalized text of an element and its descendants
fn inner_text(element: &ElementRef) -> String {
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap the content at [`MAX_CONTENT_CHARS`] characters, marking the cut
fn truncate_content(text: &str) -> String {
    match text.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_idx, _)) => {
            let mut truncated = text[..byte_idx].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text.to_string(),
    }
}

/// Collect name/property -> content pairs from the page's meta tags.
/// A repeated name keeps the last occurrence.
fn extract_metadata(document: &Html) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    for meta in document.select(&META) {
        let name = meta
            .value()
            .attr("name")
            .or_else(|| meta.value().attr("property"));
        let content = meta.value().attr("content");

        if let (Some(name), Some(content)) = (name, content) {
            metadata.insert(name.to_string(), content.to_string());
        }
    }

    metadata
}
