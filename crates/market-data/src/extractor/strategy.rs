//! Extraction strategies.
//!
//! A strategy turns a parsed document into zero or more raw candidate strings
//! for a field. The extractor parses candidates in order and keeps the first
//! one that parses, so a strategy may return noise (tooltips, headings)
//! without harm.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::parse::normalize_whitespace;

/// How many ancestor levels a labelled lookup climbs looking for a value.
const LABEL_SEARCH_DEPTH: usize = 3;

/// One way of locating a field in a quote document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExtractionStrategy {
    /// Elements matching a CSS selector. Yields each element's text, or the
    /// value of `attribute` when one is given.
    Css {
        selector: String,
        attribute: Option<String>,
    },
    /// Elements whose whole text equals `label` (case-insensitive). Yields the
    /// text of the next sibling element of the label, then of its parent, and
    /// so on for a few levels.
    Labelled { label: String },
    /// A regular expression run over the raw document. Yields capture group 1
    /// of every match.
    Pattern { regex: String },
}

/// The two views of a document a strategy can read.
pub(crate) struct Document<'a> {
    pub raw: &'a str,
    pub html: &'a Html,
}

impl ExtractionStrategy {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
            attribute: None,
        }
    }

    pub fn css_attr(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
            attribute: Some(attribute.into()),
        }
    }

    pub fn labelled(label: impl Into<String>) -> Self {
        Self::Labelled {
            label: label.into(),
        }
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::Pattern {
            regex: regex.into(),
        }
    }

    /// Check that the selector or regex compiles.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Css { selector, .. } => Selector::parse(selector)
                .map(|_| ())
                .map_err(|e| format!("invalid selector '{}': {}", selector, e)),
            Self::Labelled { label } => {
                if normalize_whitespace(label).is_empty() {
                    Err("empty label".to_string())
                } else {
                    Ok(())
                }
            }
            Self::Pattern { regex } => {
                let compiled =
                    Regex::new(regex).map_err(|e| format!("invalid regex '{}': {}", regex, e))?;
                if compiled.captures_len() < 2 {
                    return Err(format!("regex '{}' has no capture group", regex));
                }
                Ok(())
            }
        }
    }

    /// Raw candidate strings for this strategy, in document order.
    pub(crate) fn candidates(&self, document: &Document<'_>) -> Vec<String> {
        match self {
            Self::Css {
                selector,
                attribute,
            } => css_candidates(document.html, selector, attribute.as_deref()),
            Self::Labelled { label } => labelled_candidates(document.html, label),
            Self::Pattern { regex } => pattern_candidates(document.raw, regex),
        }
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn css_candidates(html: &Html, selector: &str, attribute: Option<&str>) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    html.select(&selector)
        .filter_map(|element| match attribute {
            Some(name) => element.value().attr(name).map(str::to_string),
            None => Some(element_text(&element)),
        })
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn next_sibling_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn labelled_candidates(html: &Html, label: &str) -> Vec<String> {
    let wanted = normalize_whitespace(label).to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for element in html.root_element().descendants().filter_map(ElementRef::wrap) {
        if element_text(&element).to_lowercase() != wanted {
            continue;
        }

        let mut current = Some(element);
        for _ in 0..LABEL_SEARCH_DEPTH {
            let Some(node) = current else {
                break;
            };
            if let Some(sibling) = next_sibling_element(&node) {
                let text = element_text(&sibling);
                if !text.is_empty() {
                    candidates.push(text);
                }
            }
            current = node.parent().and_then(ElementRef::wrap);
        }
    }
    candidates
}

fn pattern_candidates(raw: &str, regex: &str) -> Vec<String> {
    let Ok(regex) = Regex::new(regex) else {
        return Vec::new();
    };

    regex
        .captures_iter(raw)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(strategy: &ExtractionStrategy, raw: &str) -> Vec<String> {
        let html = Html::parse_document(raw);
        strategy.candidates(&Document { raw, html: &html })
    }

    #[test]
    fn test_css_text_candidates() {
        let raw = r#"<div><fin-streamer data-field="regularMarketPrice">1,520.30</fin-streamer></div>"#;
        let strategy = ExtractionStrategy::css(r#"fin-streamer[data-field="regularMarketPrice"]"#);
        assert_eq!(candidates(&strategy, raw), vec!["1,520.30".to_string()]);
    }

    #[test]
    fn test_css_attribute_candidates() {
        let raw = r#"<div data-last-price="2845.1" data-exchange="NSE">₹2,845.10</div>"#;
        let strategy = ExtractionStrategy::css_attr("[data-last-price]", "data-last-price");
        assert_eq!(candidates(&strategy, raw), vec!["2845.1".to_string()]);
    }

    #[test]
    fn test_labelled_climbs_past_tooltip() {
        let raw = r#"
            <div class="row">
              <span><div class="label">P/E ratio</div><div class="tip">The ratio of price to earnings</div></span>
              <div class="value">24.53</div>
            </div>"#;
        let strategy = ExtractionStrategy::labelled("p/e RATIO");
        let found = candidates(&strategy, raw);
        assert_eq!(found[0], "The ratio of price to earnings");
        assert!(found.contains(&"24.53".to_string()));
    }

    #[test]
    fn test_pattern_candidates_use_first_group() {
        let raw = r#"{"regularMarketPrice":{"raw":187.44,"fmt":"187.44"}}"#;
        let strategy = ExtractionStrategy::pattern(r#""regularMarketPrice":\{"raw":(-?[0-9.]+)"#);
        assert_eq!(candidates(&strategy, raw), vec!["187.44".to_string()]);
    }

    #[test]
    fn test_invalid_strategies_yield_nothing() {
        let raw = "<div>1</div>";
        assert!(candidates(&ExtractionStrategy::css("div[["), raw).is_empty());
        assert!(candidates(&ExtractionStrategy::pattern("(unclosed"), raw).is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(ExtractionStrategy::css("div.price").validate().is_ok());
        assert!(ExtractionStrategy::css("div[[").validate().is_err());
        assert!(ExtractionStrategy::pattern("no group").validate().is_err());
        assert!(ExtractionStrategy::pattern("(ok)").validate().is_ok());
        assert!(ExtractionStrategy::labelled("  ").validate().is_err());
    }
}
