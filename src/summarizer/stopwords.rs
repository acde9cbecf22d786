//! Stopword sets.
//!
//! A [`Stopwords`] value is built once and then only queried. The default set
//! is the NLTK English list plus every ASCII punctuation character, so that
//! custom tokenizers which emit punctuation tokens lose them along with
//! function words.

use std::collections::HashSet;

/// ASCII punctuation characters, each treated as a stopword on its own.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// The NLTK English stopword list.
const NLTK_ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// An immutable set of tokens that carry no topical signal.
///
/// Lookups are exact: callers lowercase their tokens before asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

impl Stopwords {
    /// NLTK English stopwords plus ASCII punctuation.
    pub fn english() -> Self {
        Self::from_words(NLTK_ENGLISH.iter().copied()).with_punctuation()
    }

    /// The larger stopwords-iso English list from the `stop-words` crate, plus
    /// ASCII punctuation.
    pub fn iso_english() -> Self {
        let words = stop_words::get(stop_words::LANGUAGE::English);
        Self::from_words(words.iter().map(|w| w.to_string())).with_punctuation()
    }

    /// Build a set from an arbitrary word list. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Add every ASCII punctuation character as a single-character stopword.
    pub fn with_punctuation(mut self) -> Self {
        self.words
            .extend(PUNCTUATION.chars().map(|c| c.to_string()));
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_function_words() {
        let stopwords = Stopwords::english();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("are"));
        assert!(stopwords.contains("and"));
        assert!(stopwords.contains("too"));
        assert!(stopwords.contains("don't"));
        assert!(!stopwords.contains("cats"));
        assert!(!stopwords.contains("great"));
    }

    #[test]
    fn test_english_includes_punctuation() {
        let stopwords = Stopwords::english();
        for c in PUNCTUATION.chars() {
            assert!(stopwords.contains(&c.to_string()), "missing {c:?}");
        }
        // multi-character runs are not in the set, only single characters
        assert!(!stopwords.contains("..."));
    }

    #[test]
    fn test_english_size() {
        // 179 NLTK words + 32 punctuation characters
        assert_eq!(Stopwords::english().len(), 179 + 32);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let stopwords = Stopwords::english();
        assert!(!stopwords.contains("The"));
    }

    #[test]
    fn test_custom_words_are_lowercased() {
        let stopwords = Stopwords::from_words(["Reuters", "AP"]);
        assert!(stopwords.contains("reuters"));
        assert!(stopwords.contains("ap"));
        assert!(!stopwords.contains("."));
        assert_eq!(stopwords.len(), 2);
    }

    #[test]
    fn test_empty_set() {
        let stopwords = Stopwords::from_words(Vec::<String>::new());
        assert!(stopwords.is_empty());
        assert!(!stopwords.with_punctuation().is_empty());
    }

    #[test]
    fn test_iso_english() {
        let stopwords = Stopwords::iso_english();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("and"));
        assert!(stopwords.contains(","));
        assert!(stopwords.len() > Stopwords::english().len());
    }
}
