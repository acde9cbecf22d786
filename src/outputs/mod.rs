//! Output rendering for summaries.
//!
//! # Submodules
//!
//! - [`json`]: pretty-printed JSON of the [`Summary`]
//! - [`markdown`]: a Markdown document with the headline and a bullet per sentence
//! - [`xlsx`]: the bhavcopy top-movers workbook
//!
//! Plain text (the default) prints the title on the first line and one
//! sentence per line after it.
//!
//! # Output Structure
//!
//! With `--output-dir`, the rendered summary is written to a file instead
//! of stdout:
//!
//! ```text
//! output_dir/
//! ├── 2025-05-06_washingtonpost_storm-hits-the-coast.md
//! ├── 2025-05-06_washingtonpost_storm-hits-the-coast.json
//! └── 2025-05-06_local_summary.txt
//! ```

pub mod json;
pub mod markdown;
pub mod xlsx;

use crate::models::Summary;
use crate::utils::{ensure_writable_dir, slugify_title};
use chrono::Local;
use clap::ValueEnum;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// How a summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

/// Render a summary in the requested format.
pub fn render(summary: &Summary, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(summary_to_text(summary)),
        OutputFormat::Json => json::summary_to_json(summary),
        OutputFormat::Markdown => Ok(markdown::summary_to_markdown(summary)),
    }
}

fn summary_to_text(summary: &Summary) -> String {
    let mut out = String::new();
    if let Some(title) = &summary.title {
        out.push_str(title);
        out.push('\n');
    }
    for sentence in &summary.sentences {
        out.push_str(sentence);
        out.push('\n');
    }
    out
}

/// File name for a rendered summary: `{date}_{source}_{title-slug}.{ext}`.
pub fn output_filename(summary: &Summary, format: OutputFormat) -> String {
    let date = Local::now().date_naive();
    let tag = summary.source_tag().unwrap_or_else(|| "local".to_string());
    let slug = summary
        .title
        .as_deref()
        .map(slugify_title)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "summary".to_string());
    format!("{}_{}_{}.{}", date, tag, slug, format.extension())
}

/// Write an already rendered summary into `output_dir`, creating it if needed.
///
/// Returns the path of the written file.
#[instrument(level = "info", skip_all, fields(%output_dir))]
pub async fn write_summary(
    output_dir: &str,
    summary: &Summary,
    format: OutputFormat,
    rendered: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;
    let path = PathBuf::from(output_dir).join(output_filename(summary, format));

    info!(path = %path.display(), "Writing summary");
    if let Err(e) = fs::write(&path, rendered).await {
        error!(path = %path.display(), error = %e, "Failed writing summary");
        return Err(e.into());
    }
    info!(path = %path.display(), "Wrote summary");
    Ok(path)
}
