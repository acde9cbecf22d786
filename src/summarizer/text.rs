//! Sentence segmentation and word tokenization.
//!
//! The summarizer only depends on the two traits below. The default
//! implementations follow the Unicode text segmentation rules (UAX #29) via
//! the `unicode-segmentation` crate. Closures with the right signature also
//! implement both traits, which is handy for tests and one-off pipelines.

use crate::error::BoxError;
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into sentences.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, BoxError>;
}

/// Splits one (already lowercased) sentence into word-level tokens.
pub trait Tokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, BoxError>;
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str) -> Result<Vec<String>, BoxError>,
{
    fn segment(&self, text: &str) -> Result<Vec<String>, BoxError> {
        self(text)
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<String>, BoxError>,
{
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, BoxError> {
        self(sentence)
    }
}

/// Titles and month abbreviations that end in a period without ending the
/// sentence. Compared lowercase, without the period.
const ABBREVIATIONS: &[&str] = &[
    "adm", "apr", "aug", "capt", "cmdr", "col", "corp", "dec", "dr", "feb", "gen", "gov", "hon",
    "inc", "jan", "jr", "lt", "maj", "messrs", "mr", "mrs", "ms", "mt", "nov", "oct", "pres",
    "prof", "rep", "rev", "sen", "sept", "sgt", "sr", "st", "supt",
];

/// Whether `text` ends with a known abbreviation or a single-letter initial
/// such as the `F.` in `John F. Kennedy`.
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(stem) = text.strip_suffix('.') else {
        return false;
    };
    let word = stem
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        // "I." and "A." end sentences far more often than they abbreviate
        (Some(c), None) => c.is_uppercase() && c != 'I' && c != 'A',
        (Some(_), Some(_)) => ABBREVIATIONS.contains(&word.to_lowercase().as_str()),
        _ => false,
    }
}

/// UAX #29 sentence boundaries. Sentences are trimmed and blank ones dropped.
///
/// Line breaks end a sentence, so headlines and bylines without a final
/// period come out as sentences of their own. A boundary right after a title
/// (`Mr.`, `Dr.`, `Sen.`) or an initial is not a sentence end, so those
/// pieces are joined with the text that follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, BoxError> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for piece in text.split_sentence_bounds() {
            current.push_str(piece);
            if ends_with_abbreviation(current.trim_end()) {
                continue;
            }
            push_sentence(&mut sentences, &current);
            current.clear();
        }
        push_sentence(&mut sentences, &current);

        Ok(sentences)
    }
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence.to_string());
    }
}

/// Whether a token carries any letters or digits. Tokens made only of
/// punctuation or symbols (`.`, `“`, `—`, `…`) are never counted.
pub(crate) fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

/// UAX #29 words: whitespace and punctuation-only segments are dropped.
///
/// This covers typographic quotes, dashes and ellipses as well as ASCII
/// punctuation. Contractions such as `don't` stay whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, BoxError> {
        Ok(sentence.unicode_words().map(str::to_string).collect())
    }
}
