//!
//! Sentence-aligned parallel corpus
//!
use crate::common::Word;
use crate::error::{Ibm0Error, Result};
use derive_new::new;
use fnv::FnvHashSet as HashSet;

///
/// One aligned unit of the parallel corpus: tokenized source and target sentence.
///
#[derive(new, Debug, Clone, PartialEq)]
pub struct SentencePair {
    pub source: Vec<Word>,
    pub target: Vec<Word>,
}

impl SentencePair {
    ///
    /// Construct from raw sentences by splitting on whitespace.
    ///
    /// ```
    /// use ibm0::corpus::SentencePair;
    /// let p = SentencePair::from_text("the house", "la maison");
    /// assert_eq!(p.source, vec!["the", "house"]);
    /// assert_eq!(p.target, vec!["la", "maison"]);
    /// ```
    pub fn from_text(source: &str, target: &str) -> Self {
        SentencePair::new(tokenize(source), tokenize(target))
    }
}

/// split a sentence into word tokens on whitespace
pub fn tokenize(sentence: &str) -> Vec<Word> {
    sentence.split_whitespace().map(|w| w.to_string()).collect()
}

///
/// Ordered sequence of sentence pairs.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub pairs: Vec<SentencePair>,
}

impl Corpus {
    /// Constructor of corpus
    pub fn from(pairs: Vec<SentencePair>) -> Self {
        Corpus { pairs }
    }
    /// Construct from `(source sentence, target sentence)` strings
    pub fn from_texts(texts: &[(&str, &str)]) -> Self {
        Corpus::from(
            texts
                .iter()
                .map(|(e, f)| SentencePair::from_text(e, f))
                .collect(),
        )
    }
    /// get an iterator over the sentence pairs
    pub fn iter(&self) -> impl Iterator<Item = &SentencePair> + '_ {
        self.pairs.iter()
    }
    /// the number of sentence pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    ///
    /// distinct source words over the whole corpus
    ///
    pub fn source_words(&self) -> HashSet<&str> {
        self.iter()
            .flat_map(|pair| pair.source.iter().map(|w| w.as_str()))
            .collect()
    }
    ///
    /// distinct target words over the whole corpus
    ///
    pub fn target_words(&self) -> HashSet<&str> {
        self.iter()
            .flat_map(|pair| pair.target.iter().map(|w| w.as_str()))
            .collect()
    }
    ///
    /// Check that every sentence pair has non-empty source and target sides.
    ///
    /// The uniform seed `1/|target|` is undefined for an empty target, so this
    /// must pass before any table is built.
    ///
    pub fn validate(&self) -> Result<()> {
        for (index, pair) in self.iter().enumerate() {
            if pair.target.is_empty() {
                return Err(Ibm0Error::MalformedInput {
                    index,
                    reason: "empty target sentence".to_string(),
                });
            }
            if pair.source.is_empty() {
                return Err(Ibm0Error::MalformedInput {
                    index,
                    reason: "empty source sentence".to_string(),
                });
            }
        }
        Ok(())
    }
}
