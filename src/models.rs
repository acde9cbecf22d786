//! Data models for fetched articles and their summaries.
//!
//! - [`NewsArticle`]: raw text pulled from a web page, a file or stdin
//! - [`Summary`]: the selected sentences plus provenance, serialized to JSON
//!   and rendered to text or Markdown

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A raw article before summarization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    /// Where the text came from: a URL, a file path, or `None` for stdin.
    pub source: Option<String>,
    /// The page `<title>`, when the article was fetched from the web.
    pub title: Option<String>,
    /// Plain text to summarize.
    pub content: String,
}

/// An extractive summary of one article.
///
/// `sentences` are in selection order: the highest-scoring sentence first.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub title: Option<String>,
    pub source: Option<String>,
    /// Local time the summary was produced, RFC 3339.
    pub generated_at: String,
    pub sentences: Vec<String>,
}

impl Summary {
    /// Wrap selected sentences with the article's metadata, stamped now.
    pub fn from_article(article: &NewsArticle, sentences: Vec<String>) -> Self {
        Self {
            title: article.title.clone(),
            source: article.source.clone(),
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            sentences,
        }
    }

    /// Extract the domain name (before .com/.org/etc) from the source URL.
    /// For example: "https://www.washingtonpost.com/world/..." -> "washingtonpost"
    ///
    /// Returns `None` for sources that are not URLs (files, stdin).
    pub fn source_tag(&self) -> Option<String> {
        let url = url::Url::parse(self.source.as_ref()?).ok()?;
        let host = url.host_str()?;
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2].to_string())
        } else {
            None
        }
    }
}
