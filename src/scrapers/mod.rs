//! Web page scraping for article text, and the NSE bhavcopy download.
//!
//! # Supported Sources
//!
//! Any page that wraps its story text in a consistent element. The default
//! selector is `article`, which matches the Washington Post and most sites
//! built on semantic HTML; pass a different CSS selector for other layouts.
//!
//! # Common Patterns
//!
//! - [`article::fetch_article`]: downloads the page and extracts its text
//! - [`article::extract_article`]: pure HTML-to-text step, used by the fetcher
//!   and testable without a network
//!
//! - [`bhavcopy::download_bhavcopy`]: fetches one day's NSE equities archive
//!   with the same browser headers
//!
//! One page is fetched per run. Failures surface as
//! [`article::ScrapeError`]; there is no retry.

pub mod article;
pub mod bhavcopy;
