use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::translator::translate;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

static TITLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*#\s*(.+)$").unwrap());
static HREF_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href=['"]?([^'" >]+)"#).unwrap());

/// A rendered page: the filled template plus what was found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub html: String,
    pub links: Vec<String>,
}

/// First line that looks like a `#` heading, trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    TITLE_REGEX
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(Error::MissingTitle)
}

/// Every `href` value in serialized HTML, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    HREF_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

pub fn render_page(markdown: &str, template: &str) -> Result<Page> {
    let content = translate(markdown)?;
    let title = extract_title(markdown)?;
    let links = extract_links(&content);
    Ok(Page {
        html: fill_template(template, &title, &content),
        title,
        links,
    })
}
