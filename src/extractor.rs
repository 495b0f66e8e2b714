use regex::Regex;
use scraper::{Html, Selector};

/// Element that carries the salary range on a salary page.
pub const SALARY_MARKER: &str = "span.salary-snippet";

pub struct Extractor {
    salary_selector: Selector,
    whitespace_regex: Regex,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            salary_selector: Selector::parse(SALARY_MARKER).expect("salary marker selector is valid"),
            whitespace_regex: Regex::new(r"\s+").expect("whitespace regex is valid"),
        }
    }

    /// Text of the first salary marker in `html`, or `None` when the page has
    /// no marker (or only an empty one).
    pub fn extract_salary(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let element = document.select(&self.salary_selector).next()?;
        let raw = element.text().collect::<Vec<_>>().join(" ");
        let text = self.normalize(&raw);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn normalize(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text.trim(), " ").into_owned()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
