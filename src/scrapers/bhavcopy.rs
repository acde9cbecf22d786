//! NSE bhavcopy download.
//!
//! The exchange publishes each trading day's equity closing prices as a
//! zipped CSV under a date-derived path:
//!
//! ```text
//! {base}/2024/JAN/cm05JAN2024bhav.csv.zip
//! ```
//!
//! The archive host rejects clients without a browser User-Agent, so the
//! download goes through the same request setup as article pages.

use super::article::{FetchOptions, ScrapeError, browser_get};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.nseindia.com/content/historical/EQUITIES";

/// `cm{DD}{MON}{YYYY}bhav`, e.g. `cm05JAN2024bhav`.
pub fn bhavcopy_stem(date: NaiveDate) -> String {
    format!(
        "cm{}{}{}bhav",
        date.format("%d"),
        month_code(date),
        date.format("%Y")
    )
}

/// File name of the zipped bhavcopy for `date`.
pub fn archive_name(date: NaiveDate) -> String {
    format!("{}.csv.zip", bhavcopy_stem(date))
}

/// Download URL of the bhavcopy for `date` under `base`.
pub fn bhavcopy_url(base: &str, date: NaiveDate) -> Result<Url, url::ParseError> {
    let url = format!(
        "{}/{}/{}/{}",
        base.trim_end_matches('/'),
        date.format("%Y"),
        month_code(date),
        archive_name(date)
    );
    Url::parse(&url)
}

fn month_code(date: NaiveDate) -> String {
    date.format("%b").to_string().to_uppercase()
}

/// Download the zipped bhavcopy for `date`.
#[instrument(level = "info", skip(base, options))]
pub async fn download_bhavcopy(
    base: &str,
    date: NaiveDate,
    options: &FetchOptions,
) -> Result<Vec<u8>, ScrapeError> {
    let url = bhavcopy_url(base, date)?;
    info!(%url, "Downloading bhavcopy");

    let response = browser_get(url, options)
        .await
        .inspect_err(|e| warn!(error = %e, "Bhavcopy request rejected"))?;
    let bytes = response.bytes().await?;
    info!(bytes = bytes.len(), "Downloaded bhavcopy archive");
    Ok(bytes.to_vec())
}
