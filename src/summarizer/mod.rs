//! Frequency-based extractive summarizer.
//!
//! # Pipeline
//!
//! 1. **Segmentation**: split the text into sentences ([`SentenceSegmenter`])
//! 2. **Tokenization**: lowercase each sentence and split it into tokens ([`Tokenizer`])
//! 3. **Frequencies**: count non-stopword tokens, normalize by the largest count,
//!    drop tokens outside `(min_cut, max_cut)` ([`FrequencyTable`])
//! 4. **Ranking**: score each sentence as the sum of its tokens' frequencies and
//!    order by score descending, lowest sentence index first on ties
//! 5. **Selection**: take the first `n` sentences of the ranking
//!
//! A [`Summarizer`] holds only read-only state (thresholds, stopwords and the
//! two collaborators), so one instance can serve any number of calls, from
//! any number of threads when the collaborators are `Sync`.

mod frequency;
mod stopwords;
mod text;

pub use frequency::FrequencyTable;
pub use stopwords::{PUNCTUATION, Stopwords};
pub use text::{SentenceSegmenter, Tokenizer, UnicodeSegmenter, UnicodeTokenizer};

use crate::error::{Error, Result};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Cut thresholds for normalized token frequencies.
///
/// Tokens scoring at or below `min_cut` are too rare to be informative and
/// tokens at or above `max_cut` behave like stopwords. Both are excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummarizerConfig {
    /// In `[0, 1)`. Default `0.1`.
    pub min_cut: f64,
    /// In `(0, 1]`. Default `0.9`.
    pub max_cut: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            min_cut: 0.1,
            max_cut: 0.9,
        }
    }
}

impl SummarizerConfig {
    /// Build a validated config.
    pub fn new(min_cut: f64, max_cut: f64) -> Result<Self> {
        let config = Self { min_cut, max_cut };
        config.validate()?;
        Ok(config)
    }

    /// Check `0 <= min_cut < 1`, `0 < max_cut <= 1` and `min_cut < max_cut`.
    ///
    /// NaN fails every range check.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_cut) {
            return Err(Error::InvalidConfig(format!(
                "min_cut must be in [0, 1), got {}",
                self.min_cut
            )));
        }
        if !(self.max_cut > 0.0 && self.max_cut <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "max_cut must be in (0, 1], got {}",
                self.max_cut
            )));
        }
        if self.min_cut >= self.max_cut {
            return Err(Error::InvalidConfig(format!(
                "min_cut ({}) must be below max_cut ({})",
                self.min_cut, self.max_cut
            )));
        }
        Ok(())
    }
}

/// A sentence position paired with its aggregate frequency score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSentence {
    /// Zero-based position in the segmented document.
    pub index: usize,
    pub score: f64,
}

/// Extractive summarizer ranking sentences by normalized word frequency.
///
/// # Example
///
/// ```
/// use news_summary::{Summarizer, SummarizerConfig};
///
/// let summarizer = Summarizer::new(SummarizerConfig::default())?;
/// let sentences = vec![
///     "Cats are great.".to_string(),
///     "Dogs are great too.".to_string(),
///     "Cats and dogs are pets.".to_string(),
/// ];
/// let summary = summarizer.summarize_sentences(&sentences, 1)?;
/// assert_eq!(summary, vec!["Cats and dogs are pets."]);
/// # Ok::<(), news_summary::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Summarizer<S = UnicodeSegmenter, T = UnicodeTokenizer> {
    config: SummarizerConfig,
    stopwords: Stopwords,
    segmenter: S,
    tokenizer: T,
}

impl Summarizer {
    /// Summarizer with English stopwords and Unicode segmentation.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        Self::with_parts(config, Stopwords::english(), UnicodeSegmenter, UnicodeTokenizer)
    }
}

impl<S, T> Summarizer<S, T>
where
    S: SentenceSegmenter,
    T: Tokenizer,
{
    /// Summarizer with explicit collaborators. Fails with
    /// [`Error::InvalidConfig`] if the thresholds are out of range.
    pub fn with_parts(
        config: SummarizerConfig,
        stopwords: Stopwords,
        segmenter: S,
        tokenizer: T,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            min_cut = config.min_cut,
            max_cut = config.max_cut,
            stopwords = stopwords.len(),
            "Summarizer constructed"
        );
        Ok(Self {
            config,
            stopwords,
            segmenter,
            tokenizer,
        })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Normalized frequencies for pre-tokenized sentences.
    ///
    /// Fails with [`Error::DegenerateInput`] when no non-stopword token exists.
    pub fn compute_frequencies<W: AsRef<str>>(&self, sentences: &[Vec<W>]) -> Result<FrequencyTable> {
        frequency::compute(
            sentences,
            &self.stopwords,
            self.config.min_cut,
            self.config.max_cut,
        )
    }

    /// Summarize raw text into its `n` highest-scoring sentences, best first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if `n` exceeds the number of sentences
    /// - [`Error::DegenerateInput`] if the text has no scorable tokens
    /// - [`Error::Collaborator`] if segmentation or tokenization fails
    pub fn summarize(&self, text: &str, n: usize) -> Result<Vec<String>> {
        let sentences = self.segmenter.segment(text)?;
        self.summarize_sentences(&sentences, n)
    }

    /// Same as [`summarize`](Self::summarize) for an already segmented document.
    #[instrument(level = "debug", skip_all, fields(sentences = sentences.len(), n))]
    pub fn summarize_sentences(&self, sentences: &[String], n: usize) -> Result<Vec<String>> {
        if n > sentences.len() {
            return Err(Error::InvalidRequest {
                requested: n,
                available: sentences.len(),
            });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let ranking = self.rank(sentences)?;
        Ok(ranking
            .into_iter()
            .take(n)
            .map(|scored| sentences[scored.index].clone())
            .collect())
    }

    /// Score every sentence and order them by score descending, breaking ties
    /// by lowest index. Sentences without surviving tokens score 0.
    pub fn rank(&self, sentences: &[String]) -> Result<Vec<ScoredSentence>> {
        let tokenized = sentences
            .iter()
            .map(|sentence| self.tokenizer.tokenize(&sentence.to_lowercase()))
            .collect::<Result<Vec<_>, _>>()?;

        let table = self.compute_frequencies(&tokenized)?;
        debug!(tokens = table.len(), "Computed frequency table");

        let ranking = tokenized
            .iter()
            .enumerate()
            .map(|(index, tokens)| ScoredSentence {
                index,
                score: table.score_tokens(tokens),
            })
            .sorted_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)))
            .collect();
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;

    fn doc(sentences: &[&str]) -> Vec<String> {
        sentences.iter().map(|s| s.to_string()).collect()
    }

    fn cats_and_dogs() -> Vec<String> {
        doc(&[
            "Cats are great.",
            "Dogs are great too.",
            "Cats and dogs are pets.",
        ])
    }

    #[test]
    fn test_default_config() {
        let config = SummarizerConfig::default();
        assert_eq!(config.min_cut, 0.1);
        assert_eq!(config.max_cut, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(SummarizerConfig::new(0.0, 1.0).is_ok());
        assert!(SummarizerConfig::new(0.2, 0.8).is_ok());

        for (min_cut, max_cut) in [
            (-0.1, 0.9),
            (1.0, 1.0),
            (0.1, 0.0),
            (0.1, 1.5),
            (0.5, 0.5),
            (0.6, 0.4),
            (f64::NAN, 0.9),
            (0.1, f64::NAN),
        ] {
            let err = SummarizerConfig::new(min_cut, max_cut).unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfig(_)),
                "({min_cut}, {max_cut}) should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SummarizerConfig {
            min_cut: 0.9,
            max_cut: 0.1,
        };
        assert!(matches!(
            Summarizer::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cats_and_dogs_example() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let summary = summarizer.summarize_sentences(&cats_and_dogs(), 1).unwrap();
        assert_eq!(summary, vec!["Cats and dogs are pets."]);
    }

    #[test]
    fn test_rank_scores_and_tie_break() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let ranking = summarizer.rank(&cats_and_dogs()).unwrap();
        assert_eq!(
            ranking,
            vec![
                ScoredSentence { index: 2, score: 0.5 },
                ScoredSentence { index: 0, score: 0.0 },
                ScoredSentence { index: 1, score: 0.0 },
            ]
        );
    }

    #[test]
    fn test_selection_order_is_score_order() {
        // "storm" x3 scores 1.0 and is cut; "coast" x2 scores 2/3, every other
        // content word scores 1/3.
        let sentences = doc(&[
            "Storm warning.",
            "Storm hits the coast.",
            "Flood waters reach the coast after the storm.",
        ]);
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let summary = summarizer.summarize_sentences(&sentences, 2).unwrap();
        assert_eq!(
            summary,
            vec![
                "Flood waters reach the coast after the storm.",
                "Storm hits the coast."
            ]
        );
    }

    #[test]
    fn test_summarize_segments_text() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let summary = summarizer
            .summarize("Cats are great. Dogs are great too. Cats and dogs are pets.", 1)
            .unwrap();
        assert_eq!(summary, vec!["Cats and dogs are pets."]);
    }

    #[test]
    fn test_zero_sentences() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        assert!(summarizer.summarize_sentences(&cats_and_dogs(), 0).unwrap().is_empty());
        assert!(summarizer.summarize("", 0).unwrap().is_empty());
    }

    #[test]
    fn test_all_sentences() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let sentences = cats_and_dogs();
        let mut summary = summarizer.summarize_sentences(&sentences, 3).unwrap();
        summary.sort();
        let mut expected = sentences.clone();
        expected.sort();
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_too_many_sentences() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let err = summarizer.summarize_sentences(&cats_and_dogs(), 4).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRequest {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn test_degenerate_document() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let err = summarizer.summarize("The. And it is.", 1).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput));
    }

    #[test]
    fn test_tokenizer_error_propagates() {
        let failing = |_: &str| -> Result<Vec<String>, BoxError> { Err("tokenizer offline".into()) };
        let summarizer = Summarizer::with_parts(
            SummarizerConfig::default(),
            Stopwords::english(),
            UnicodeSegmenter,
            failing,
        )
        .unwrap();
        let err = summarizer.summarize("One sentence here.", 1).unwrap_err();
        assert!(matches!(err, Error::Collaborator(_)));
        assert_eq!(err.to_string(), "tokenizer offline");
    }

    #[test]
    fn test_segmenter_error_propagates() {
        let failing = |_: &str| -> Result<Vec<String>, BoxError> { Err("bad input encoding".into()) };
        let summarizer = Summarizer::with_parts(
            SummarizerConfig::default(),
            Stopwords::english(),
            failing,
            UnicodeTokenizer,
        )
        .unwrap();
        let err = summarizer.summarize("Anything.", 0).unwrap_err();
        assert!(matches!(err, Error::Collaborator(_)));
        assert_eq!(err.to_string(), "bad input encoding");
    }

    #[test]
    fn test_curly_quotes_do_not_rescale_scores() {
        // "said" appears twice and must normalize to 1.0 against the other
        // words, not against the six quote marks
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        let sentences = doc(&[
            "“Markets fell,” analysts said.",
            "“Rates rose” — traders said.",
            "“Wait…” one added.",
            "Shares closed lower.",
        ]);
        let tokenized: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| UnicodeTokenizer.tokenize(&s.to_lowercase()).unwrap())
            .collect();
        let table = summarizer.compute_frequencies(&tokenized).unwrap();
        assert!(!table.contains("said"));
        assert_eq!(table.get("markets"), Some(0.5));
        assert_eq!(table.get("shares"), Some(0.5));
        assert!(!table.contains("“"));
    }

    #[test]
    fn test_custom_stopwords() {
        // with "pets" as a stopword nothing survives the cuts, so ties fall
        // back to document order
        let summarizer = Summarizer::with_parts(
            SummarizerConfig::default(),
            Stopwords::from_words(["are", "and", "too", "pets"]).with_punctuation(),
            UnicodeSegmenter,
            UnicodeTokenizer,
        )
        .unwrap();
        let summary = summarizer.summarize_sentences(&cats_and_dogs(), 1).unwrap();
        assert_eq!(summary, vec!["Cats are great."]);
    }

    #[test]
    fn test_summarizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Summarizer>();
    }
}
