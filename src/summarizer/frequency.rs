//! Normalized token frequencies.

use super::stopwords::Stopwords;
use super::text::is_word;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Token scores normalized against the most frequent token of a document.
///
/// Only tokens whose score fell strictly between the cut bounds are stored;
/// everything else (stopwords, too-rare and too-common tokens) is absent and
/// contributes nothing to sentence scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    scores: HashMap<String, f64>,
}

impl FrequencyTable {
    pub fn get(&self, token: &str) -> Option<f64> {
        self.scores.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.scores.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(token, score)| (token.as_str(), *score))
    }

    /// Sum of the scores of every token present in the table. Repeated tokens
    /// count once per occurrence.
    pub fn score_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> f64 {
        tokens
            .iter()
            .filter_map(|t| self.get(t.as_ref()))
            .fold(0.0, |acc, score| acc + score)
    }
}

/// Count non-stopword tokens across all sentences, normalize by the largest
/// count, and keep the tokens with `min_cut < score < max_cut`.
///
/// Tokens without a single letter or digit are skipped like stopwords, so
/// quotes and dashes from a custom tokenizer never set the maximum.
pub(crate) fn compute<S: AsRef<str>>(
    sentences: &[Vec<S>],
    stopwords: &Stopwords,
    min_cut: f64,
    max_cut: f64,
) -> Result<FrequencyTable> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in sentences.iter().flatten() {
        let token: &str = token.as_ref();
        if is_word(token) && !stopwords.contains(token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let max = counts
        .values()
        .copied()
        .max()
        .ok_or(Error::DegenerateInput)? as f64;

    let scores = counts
        .into_iter()
        .filter_map(|(token, count)| {
            let score = count as f64 / max;
            (score > min_cut && score < max_cut).then(|| (token.to_string(), score))
        })
        .collect();

    Ok(FrequencyTable { scores })
}
