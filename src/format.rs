//! Display formatting for a finished summary.

use crate::scraper::PageRecord;

/// A summary ready for display: page heading, source URL and the generated
/// paragraphs in order.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    pub title: String,
    pub url: String,
    pub paragraphs: Vec<String>,
}

impl SummaryResult {
    /// Render the summary as an HTML fragment: an `<h3>` heading, a small
    /// URL line, then one `<p>` per paragraph. The generated text is kept
    /// verbatim, with no Markdown or rich-text interpretation.
    pub fn display_markup(&self) -> String {
        let mut markup = String::new();
        markup.push_str(&format!("<h3>{}</h3>", self.title));
        markup.push_str(&format!("<p><small>{}</small></p>", self.url));
        for paragraph in &self.paragraphs {
            markup.push_str(&format!("<p>{}</p>", paragraph));
        }
        markup
    }
}

/// Pair the generated text with its page: split on newlines, drop blank
/// lines, keep the rest in order.
pub fn format_summary(page: &PageRecord, summary_text: &str) -> SummaryResult {
    let paragraphs = summary_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect();

    SummaryResult {
        title: page.title.clone(),
        url: page.url.clone(),
        paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn page() -> PageRecord {
        PageRecord {
            title: "T".to_string(),
            content: String::new(),
            url: "U".to_string(),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn drops_blank_lines_and_keeps_order() {
        let result = format_summary(&page(), "A\n\nB\n");
        assert_eq!(result.paragraphs, vec!["A", "B"]);
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        let result = format_summary(&page(), "A\n   \nB");
        assert_eq!(result.paragraphs, vec!["A", "B"]);
    }

    #[test]
    fn markup_has_heading_url_and_paragraphs() {
        let result = format_summary(&page(), "Para one.\nPara two.");
        assert_eq!(
            result.display_markup(),
            "<h3>T</h3><p><small>U</small></p><p>Para one.</p><p>Para two.</p>"
        );
    }

    #[test]
    fn empty_summary_still_renders_heading() {
        let result = format_summary(&page(), "");
        assert!(result.paragraphs.is_empty());
        assert_eq!(result.display_markup(), "<h3>T</h3><p><small>U</small></p>");
    }
}
