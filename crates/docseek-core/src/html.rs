//! `scraper`-backed implementation of [`MarkupParser`].

use scraper::{ElementRef, Html, Node, Selector};

use crate::traits::{MarkupParser, ParsedMarkup};

/// Elements whose text never reaches the reader.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break the text flow. Inline elements join their neighbours.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "summary", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

pub struct ScraperParser {
    title: Selector,
    summary: Selector,
    body: Selector,
}

impl ScraperParser {
    pub fn new() -> Result<Self, String> {
        let select = |css: &str| Selector::parse(css).map_err(|e| format!("bad selector '{}': {:?}", css, e));
        Ok(Self { title: select("title")?, summary: select("summary")?, body: select("body")? })
    }

    fn joined_text(&self, html: &Html, selector: &Selector) -> Option<String> {
        let mut found = false;
        let mut parts = Vec::new();
        for element in html.select(selector) {
            found = true;
            let text = collapse_whitespace(&element.text().collect::<String>());
            if !text.is_empty() { parts.push(text); }
        }
        found.then(|| parts.join(" "))
    }

    fn body_text(&self, html: &Html) -> String {
        let Some(body) = html.select(&self.body).next() else { return String::new() };
        let mut raw = String::new();
        visible_text(body, &mut raw);
        collapse_whitespace(&raw)
    }
}

fn visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if INVISIBLE.contains(&e.name()) => {}
            Node::Element(e) => {
                let block = BLOCK.contains(&e.name());
                if block { out.push(' '); }
                if let Some(inner) = ElementRef::wrap(child) {
                    visible_text(inner, out);
                }
                if block { out.push(' '); }
            }
            _ => {}
        }
    }
}

impl MarkupParser for ScraperParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedMarkup, String> {
        // html5ever never fails; malformed markup and encodings degrade to best-effort text
        let source = String::from_utf8_lossy(bytes);
        let html = Html::parse_document(&source);
        Ok(ParsedMarkup {
            title: self.joined_text(&html, &self.title).unwrap_or_default(),
            summary: self.joined_text(&html, &self.summary),
            body: self.body_text(&html),
        })
    }
}

/// Trim and collapse every whitespace run into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
