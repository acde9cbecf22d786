//! JSON output.
//!
//! The document mirrors [`Summary`] field for field:
//!
//! ```text
//! {
//!   "title": "Storm hits the coast",
//!   "source": "https://www.washingtonpost.com/...",
//!   "generated_at": "2025-05-06T20:30:00+02:00",
//!   "sentences": ["...", "..."]
//! }
//! ```

use crate::models::Summary;

/// Serialize a [`Summary`] as pretty-printed JSON with a trailing newline.
pub fn summary_to_json(summary: &Summary) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}
