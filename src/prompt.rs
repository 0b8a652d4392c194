//! Prompt construction for the summarisation request.

use crate::scraper::PageRecord;
use crate::settings::SummaryLength;

/// Length instruction handed to the model, one per verbosity setting
fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => "Provide a brief summary in 1-2 short paragraphs.",
        SummaryLength::Medium => "Provide a balanced summary in 3-4 paragraphs covering the main points.",
        SummaryLength::Long => {
            "Provide a comprehensive summary in 5 or more paragraphs, with detailed information and key points."
        }
    }
}

/// Build the instruction string sent to the model.
///
/// Embeds the page title, URL, meta description (when the page has one) and
/// the extracted content verbatim. The fields feed a language model, not an
/// interpreter, so no escaping is applied.
pub fn build_summary_prompt(page: &PageRecord, length: SummaryLength) -> String {
    let description = page
        .metadata
        .get("description")
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("Description: {}\n\n", d))
        .unwrap_or_default();

    format!(
        r#"Summarize the following webpage content:

Title: {title}
URL: {url}

{description}Content:
{content}

Instructions:
- {length_instruction}
- Extract the main ideas, key points, and important details.
- Maintain a neutral and informative tone.
- Format the summary with proper paragraphs.
- If the content is technical, preserve key technical details.
- Include important facts, figures, and statistics when present.
- Do not add information that isn't in the original content."#,
        title = page.title,
        url = page.url,
        description = description,
        content = page.content,
        length_instruction = length_instruction(length),
    )
}
