//! # News Summary
//!
//! Fetches a news article (or reads text from a file or stdin) and prints an
//! extractive summary: the sentences whose words are most characteristic of
//! the article, by normalized word frequency.
//!
//! ## Usage
//!
//! ```sh
//! news_summary --url https://www.washingtonpost.com/... -n 3
//! news_summary bhavcopy --date 2024-01-05
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: CLI flags layered over an optional YAML file
//! 2. **Input**: fetch and scrape the page, or read plain text
//! 3. **Summarization**: [`news_summary::Summarizer`] picks the top sentences
//! 4. **Output**: render as text, JSON or Markdown to stdout or a directory
//!
//! The `bhavcopy` subcommand swaps steps 2 to 4 for the NSE pipeline:
//! download (or read) the day's ZIP, extract it, rank the securities by
//! percent change and by traded value, and write both rankings to an Excel
//! workbook next to the extracted CSV.

use chrono::Local;
use clap::Parser;
use news_summary::{Summarizer, UnicodeSegmenter, UnicodeTokenizer};
use std::error::Error;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod bhavcopy;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;

use bhavcopy::BhavcopyError;
use cli::{BhavcopyArgs, Cli, Command};
use config::{FileConfig, Settings};
use models::{NewsArticle, Summary};
use scrapers::article::{FetchOptions, fetch_article};
use scrapers::bhavcopy::{archive_name, download_bhavcopy};
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_summary starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Load config ----
    let file_config = match &args.config {
        Some(path) => config::load_config(path).await.inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load configuration");
        })?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)
        .inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(
        min_cut = settings.summarizer.min_cut,
        max_cut = settings.summarizer.max_cut,
        sentences = settings.sentences,
        stopwords = ?settings.stopwords,
        "Resolved settings"
    );

    match &args.command {
        Some(Command::Bhavcopy(bhav)) => run_bhavcopy(bhav, &settings.fetch).await?,
        None => run_summary(&args, &settings).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Read the article, summarize it and emit the rendered summary.
#[instrument(level = "info", skip_all)]
async fn run_summary(args: &Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    // ---- Read input ----
    let article = read_article(args, settings).await?;
    debug!(
        content = %truncate_for_log(&article.content, 300),
        "Article text"
    );

    // ---- Summarize ----
    let summarizer = Summarizer::with_parts(
        settings.summarizer,
        settings.stopwords.load(),
        UnicodeSegmenter,
        UnicodeTokenizer,
    )?;
    let sentences = summarizer
        .summarize(&article.content, settings.sentences)
        .inspect_err(|e| error!(error = %e, "Summarization failed"))?;
    info!(count = sentences.len(), "Selected summary sentences");

    // ---- Output ----
    let summary = Summary::from_article(&article, sentences);
    let rendered = outputs::render(&summary, args.format)?;
    match &args.output_dir {
        Some(dir) => {
            let path = outputs::write_summary(dir, &summary, args.format, &rendered).await?;
            info!(path = %path.display(), "Summary written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Fetch or read one bhavcopy archive, extract it into the data directory
/// and write the two top-mover rankings as a workbook beside it.
#[instrument(level = "info", skip_all, fields(data_dir = %args.data_dir))]
async fn run_bhavcopy(args: &BhavcopyArgs, fetch: &FetchOptions) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(&args.data_dir).await?;
    let data_dir = Path::new(&args.data_dir);

    let bytes = match &args.archive {
        Some(path) => tokio::fs::read(path)
            .await
            .inspect_err(|e| error!(path = %path.display(), error = %e, "Failed to read archive"))?,
        None => {
            let date = args.date.unwrap_or_else(|| Local::now().date_naive());
            let bytes = download_bhavcopy(&args.base_url, date, fetch)
                .await
                .inspect_err(|e| error!(%date, error = %e, "Bhavcopy download failed"))?;
            let path = data_dir.join(archive_name(date));
            tokio::fs::write(&path, &bytes).await?;
            info!(path = %path.display(), "Saved bhavcopy archive");
            bytes
        }
    };

    let entries = bhavcopy::extract_archive(&bytes)
        .inspect_err(|e| error!(error = %e, "Failed to extract archive"))?;
    for entry in &entries {
        let path = data_dir.join(&entry.path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &entry.data).await?;
        debug!(path = %path.display(), "Extracted file");
    }

    let csv = entries
        .iter()
        .find(|entry| entry.is_csv())
        .ok_or(BhavcopyError::NoCsv)?;
    let records = bhavcopy::parse_bhavcopy(csv.data.as_slice())
        .inspect_err(|e| error!(path = %csv.path.display(), error = %e, "Failed to parse bhavcopy"))?;

    let by_pct = bhavcopy::top_by_pct_change(&records, args.top);
    let by_value = bhavcopy::top_by_traded_value(&records, args.top);
    let workbook = data_dir.join(csv.path.with_extension("xlsx"));
    outputs::xlsx::write_top_movers(&workbook, &by_pct, &by_value, args.top).await?;
    info!(path = %workbook.display(), securities = records.len(), "Top movers written");

    let [pct_title, value_title] = outputs::xlsx::sheet_names(args.top);
    print!(
        "{}\n{}",
        outputs::xlsx::movers_to_text(&pct_title, &by_pct),
        outputs::xlsx::movers_to_text(&value_title, &by_value)
    );
    Ok(())
}

/// Fetch from `--url`, read `--file`, or fall back to stdin.
#[instrument(level = "info", skip_all)]
async fn read_article(args: &Cli, settings: &Settings) -> Result<NewsArticle, Box<dyn Error>> {
    if let Some(url) = &args.url {
        let article = fetch_article(url, &settings.fetch)
            .await
            .inspect_err(|e| error!(%url, error = %e, "Article fetch failed"))?;
        return Ok(article);
    }

    if let Some(path) = &args.file {
        let content = tokio::fs::read_to_string(path)
            .await
            .inspect_err(|e| error!(path = %path.display(), error = %e, "Failed to read input file"))?;
        info!(path = %path.display(), bytes = content.len(), "Read input file");
        return Ok(NewsArticle {
            source: Some(path.display().to_string()),
            title: None,
            content,
        });
    }

    let mut content = String::new();
    tokio::io::stdin().read_to_string(&mut content).await?;
    info!(bytes = content.len(), "Read input from stdin");
    Ok(NewsArticle {
        source: None,
        title: None,
        content,
    })
}
