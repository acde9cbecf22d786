//! Command-line interface definitions for News Summary.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Summarizer and scraper options left unset here fall back to the YAML
//! config file, then to built-in defaults (see [`crate::config`]).

use crate::config::StopwordList;
use crate::outputs::OutputFormat;
use crate::scrapers::bhavcopy::DEFAULT_BASE_URL;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the News Summary application.
///
/// The article text comes from `--url`, `--file`, or stdin when neither is
/// given.
///
/// # Examples
///
/// ```sh
/// # Three-sentence summary of a web article
/// news_summary --url https://www.washingtonpost.com/...
///
/// # Five sentences from a local file, as Markdown written to ./summaries
/// news_summary --file story.txt -n 5 -f markdown -o ./summaries
///
/// # Piped text with tighter cut thresholds
/// cat story.txt | news_summary --min-cut 0.2 --max-cut 0.8
///
/// # Top 5 NSE movers of a trading day, as an Excel workbook in ./stockdata
/// news_summary bhavcopy --date 2024-01-05
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// URL of the article to fetch and summarize
    #[arg(short, long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read plain text from this file instead of fetching a URL
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Number of sentences in the summary [default: 3]
    #[arg(short = 'n', long)]
    pub sentences: Option<usize>,

    /// Tokens with normalized frequency at or below this are ignored [default: 0.1]
    #[arg(long)]
    pub min_cut: Option<f64>,

    /// Tokens with normalized frequency at or above this are ignored [default: 0.9]
    #[arg(long)]
    pub max_cut: Option<f64>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_SUMMARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// CSS selector for the elements holding article text [default: article]
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Stopword list [default: nltk]
    #[arg(long, value_enum)]
    pub stopwords: Option<StopwordList>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the summary into this directory instead of stdout
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download an NSE bhavcopy and export the day's top movers to a workbook
    Bhavcopy(BhavcopyArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct BhavcopyArgs {
    /// Trading day, YYYY-MM-DD [default: today]
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Read this bhavcopy ZIP instead of downloading one
    #[arg(short, long)]
    pub archive: Option<PathBuf>,

    /// Directory for the archive, the extracted CSV and the workbook
    #[arg(short = 'o', long, default_value = "stockdata")]
    pub data_dir: String,

    /// Rows in each ranking
    #[arg(short = 'n', long, default_value_t = 5)]
    pub top: usize,

    /// Base URL of the NSE equities archive
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}
