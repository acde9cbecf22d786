//! Configuration loading and resolution.
//!
//! Settings are layered: CLI flags win over the YAML config file, which wins
//! over built-in defaults. Every key in the file is optional:
//!
//! ```yaml
//! min_cut: 0.1
//! max_cut: 0.9
//! sentences: 3
//! selector: article
//! stopwords: nltk        # or iso
//! user_agent: "Mozilla/5.0 ..."
//! accept: "text/html,..."
//! timeout_secs: 30
//! ```

use crate::cli::Cli;
use crate::scrapers::article::FetchOptions;
use clap::ValueEnum;
use news_summary::{Stopwords, SummarizerConfig};
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_SENTENCES: usize = 3;

/// Which built-in stopword list to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StopwordList {
    /// NLTK English list (179 words) plus punctuation
    #[default]
    Nltk,
    /// stopwords-iso English list plus punctuation
    Iso,
}

impl StopwordList {
    pub fn load(self) -> Stopwords {
        match self {
            StopwordList::Nltk => Stopwords::english(),
            StopwordList::Iso => Stopwords::iso_english(),
        }
    }
}

/// Contents of the optional YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub min_cut: Option<f64>,
    pub max_cut: Option<f64>,
    pub sentences: Option<usize>,
    pub selector: Option<String>,
    pub stopwords: Option<StopwordList>,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<FileConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let config: FileConfig = serde_yaml::from_str(&raw)?;
    info!("Loaded configuration");
    Ok(config)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub summarizer: SummarizerConfig,
    pub sentences: usize,
    pub stopwords: StopwordList,
    pub fetch: FetchOptions,
}

impl Settings {
    /// Merge CLI flags over file values over defaults, validating the cut
    /// thresholds.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, news_summary::Error> {
        let defaults = SummarizerConfig::default();
        let summarizer = SummarizerConfig::new(
            cli.min_cut.or(file.min_cut).unwrap_or(defaults.min_cut),
            cli.max_cut.or(file.max_cut).unwrap_or(defaults.max_cut),
        )?;

        let fetch_defaults = FetchOptions::default();
        let fetch = FetchOptions {
            user_agent: file.user_agent.unwrap_or(fetch_defaults.user_agent),
            accept: file.accept.unwrap_or(fetch_defaults.accept),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(fetch_defaults.timeout),
            selector: cli
                .selector
                .clone()
                .or(file.selector)
                .unwrap_or(fetch_defaults.selector),
        };

        Ok(Self {
            summarizer,
            sentences: cli.sentences.or(file.sentences).unwrap_or(DEFAULT_SENTENCES),
            stopwords: cli.stopwords.or(file.stopwords).unwrap_or_default(),
            fetch,
        })
    }
}
