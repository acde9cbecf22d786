//! # News Summary
//!
//! Frequency-based extractive summarization. A document is split into
//! sentences, every sentence into lowercase tokens, and each token gets a
//! score equal to its occurrence count divided by the count of the most
//! frequent token. Tokens that are too rare (`<= min_cut`) or too common
//! (`>= max_cut`) are dropped, and the sentences whose surviving tokens add
//! up to the largest totals make up the summary.
//!
//! ## Usage
//!
//! ```
//! use news_summary::{Summarizer, SummarizerConfig};
//!
//! let summarizer = Summarizer::new(SummarizerConfig::default())?;
//! let summary = summarizer.summarize(
//!     "Cats are great. Dogs are great too. Cats and dogs are pets.",
//!     1,
//! )?;
//! assert_eq!(summary, vec!["Cats and dogs are pets."]);
//! # Ok::<(), news_summary::Error>(())
//! ```
//!
//! Sentences come back in selection order: the highest-scoring sentence is
//! first, regardless of where it appears in the document.

pub mod error;
pub mod summarizer;

pub use error::{BoxError, Error, Result};
pub use summarizer::{
    FrequencyTable, ScoredSentence, SentenceSegmenter, Stopwords, Summarizer, SummarizerConfig,
    Tokenizer, UnicodeSegmenter, UnicodeTokenizer,
};
