//! Markdown output.

use crate::models::Summary;
use std::fmt::Write;

/// Render a summary as a small Markdown document: headline, source link,
/// then one bullet per sentence in selection order.
pub fn summary_to_markdown(summary: &Summary) -> String {
    let mut md = String::new();

    let title = summary.title.as_deref().unwrap_or("Summary");
    writeln!(md, "# {}\n", title).unwrap();

    if let Some(source) = &summary.source {
        if source.starts_with("http://") || source.starts_with("https://") {
            writeln!(md, "Source: <{}>\n", source).unwrap();
        } else {
            writeln!(md, "Source: `{}`\n", source).unwrap();
        }
    }
    writeln!(md, "_Generated {}_\n", summary.generated_at).unwrap();

    for sentence in &summary.sentences {
        writeln!(md, "- {}", sentence).unwrap();
    }
    md
}
