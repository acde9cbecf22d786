//! Article page scraper.
//!
//! Fetches a page with browser-like request headers, takes the `<title>` as
//! the headline, and concatenates the text of every element matching the
//! configured selector. Runs of whitespace are collapsed so the sentence
//! segmenter sees one paragraph per line.

use crate::models::NewsArticle;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Response};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Some news sites block non-browser clients, so requests carry a desktop
/// browser User-Agent by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/53.0.2785.143 Safari/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_SELECTOR: &str = "article";

/// Elements whose text starts on a line of its own.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector"));
static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("static regex"));
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").expect("static regex"));

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid article url: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
    #[error("no element matching {0:?} contains text")]
    NoContent(String),
}

/// Request and extraction settings for [`fetch_article`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub user_agent: String,
    pub accept: String,
    pub timeout: Duration,
    /// CSS selector for the elements holding the story text.
    pub selector: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout: Duration::from_secs(30),
            selector: DEFAULT_SELECTOR.to_string(),
        }
    }
}

/// GET `url` with the browser-like headers from `options`, failing on a
/// non-success status.
pub(crate) async fn browser_get(url: Url, options: &FetchOptions) -> Result<Response, reqwest::Error> {
    let client = Client::builder()
        .user_agent(&options.user_agent)
        .timeout(options.timeout)
        .build()?;
    client
        .get(url)
        .header(ACCEPT, &options.accept)
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.8")
        .send()
        .await?
        .error_for_status()
}

/// Fetch a single article page and extract its text.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_article(url: &str, options: &FetchOptions) -> Result<NewsArticle, ScrapeError> {
    let url = Url::parse(url)?;
    info!("Fetching article");

    let response = browser_get(url.clone(), options)
        .await
        .inspect_err(|e| warn!(error = %e, "Article request rejected"))?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "Downloaded article page");

    extract_article(url.as_str(), &body, &options.selector)
}

/// Extract the title and story text from an HTML page.
pub fn extract_article(source: &str, html: &str, selector: &str) -> Result<NewsArticle, ScrapeError> {
    let content_selector = Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| normalize_whitespace(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let mut content = String::new();
    for element in document.select(&content_selector) {
        content.push_str(&block_text(element));
        content.push('\n');
    }
    let content = normalize_whitespace(&content);
    if content.is_empty() {
        return Err(ScrapeError::NoContent(selector.to_string()));
    }

    info!(bytes = content.len(), title = ?title, "Parsed article");
    Ok(NewsArticle {
        source: Some(source.to_string()),
        title,
        content,
    })
}

/// Text of `element` with a line break wherever the enclosing block element
/// changes, so sibling paragraphs stay apart even in minified markup.
fn block_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    let mut current_block = None;
    for node in element.descendants() {
        match node.value() {
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            Node::Text(chunk) => {
                let block = node
                    .ancestors()
                    .find(|a| {
                        a.value()
                            .as_element()
                            .is_some_and(|el| BLOCK_TAGS.contains(&el.name()))
                    })
                    .map(|a| a.id());
                if !text.is_empty() && block != current_block {
                    text.push('\n');
                }
                current_block = block;
                text.push_str(chunk);
            }
            _ => {}
        }
    }
    text
}

/// Collapse horizontal whitespace to single spaces and blank-line runs to a
/// single newline, then trim.
fn normalize_whitespace(text: &str) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text, " ");
    LINE_BREAKS.replace_all(&text, "\n").trim().to_string()
}
