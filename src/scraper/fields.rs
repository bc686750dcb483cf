// src/scraper/fields.rs

use scraper::{ElementRef, Selector};
use url::Url;

/// What to read off the matched element.
#[derive(Debug, Clone, Copy)]
pub enum FieldSource<'a> {
    /// All descendant text, whitespace collapsed to single spaces.
    Text,
    /// Descendant text chunks, one per line, blanks dropped. Mirrors how a
    /// browser renders stacked spans as separate lines of innerText.
    Lines,
    /// An attribute holding a link, resolved against the page URL.
    Link(&'a str),
}

/// Pulls single fields out of a card node. Absence is an ordinary outcome
/// and never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor<'a> {
    page_url: Option<&'a Url>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(page_url: Option<&'a Url>) -> Self {
        Self { page_url }
    }

    /// First match under `node`, or `None` when nothing matches or the
    /// match is empty after trimming.
    pub fn try_extract(
        &self,
        node: ElementRef<'_>,
        selector: &Selector,
        source: FieldSource<'_>,
    ) -> Option<String> {
        let element = node.select(selector).next()?;

        let value = match source {
            FieldSource::Text => collapsed_text(element),
            FieldSource::Lines => text_lines(element),
            FieldSource::Link(attr) => self.resolve(element.value().attr(attr)?.trim()),
        };

        Some(value).filter(|v| !v.is_empty())
    }

    pub fn extract_or(
        &self,
        node: ElementRef<'_>,
        selector: &Selector,
        source: FieldSource<'_>,
        sentinel: &str,
    ) -> String {
        self.try_extract(node, selector, source)
            .unwrap_or_else(|| sentinel.to_string())
    }

    fn resolve(&self, raw: &str) -> String {
        match self.page_url {
            Some(base) if !raw.is_empty() => base
                .join(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string()),
            _ => raw.to_string(),
        }
    }
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_lines(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
