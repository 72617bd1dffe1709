//!
//! Uniform seed of `t(f|e)` (first iteration)
//!
use crate::corpus::{Corpus, SentencePair};
use crate::table::ProbTable;
use itertools::iproduct;

///
/// Add the uniform seed `1/|f|` of the sentence pair to every
/// `(e, f)` in `source x target`.
///
/// The table is shared across all the pairs of the corpus, so co-occurrences
/// in different sentences sum up their seeds.
/// The target sentence must be non-empty (see `Corpus::validate`).
///
pub fn initialize(pair: &SentencePair, table: &mut ProbTable) {
    debug_assert!(!pair.target.is_empty());
    let uniform = 1.0 / pair.target.len() as f64;
    for (e, f) in iproduct!(pair.source.iter(), pair.target.iter()) {
        table.accumulate(e, f, uniform);
    }
}

///
/// Seed a new table from all the sentence pairs in corpus order.
///
pub fn initialize_corpus(corpus: &Corpus) -> ProbTable {
    let mut table = ProbTable::new();
    for pair in corpus.iter() {
        initialize(pair, &mut table);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pair_is_uniform() {
        let mut t = ProbTable::new();
        initialize(&SentencePair::from_text("the house", "la maison"), &mut t);
        for e in ["the", "house"] {
            for f in ["la", "maison"] {
                assert_abs_diff_eq!(t.get(e, f), 0.5);
            }
        }
        assert_eq!(t.n_entries(), 4);
    }

    #[test]
    fn repeated_cooccurrence_sums_seeds() {
        let corpus = Corpus::from_texts(&[("the house", "la maison"), ("the", "la")]);
        let t = initialize_corpus(&corpus);
        assert_abs_diff_eq!(t.get("the", "la"), 1.5);
        assert_abs_diff_eq!(t.get("the", "maison"), 0.5);
        assert_abs_diff_eq!(t.get("house", "la"), 0.5);
        assert_eq!(t.get("house", "chien"), 0.0);
    }

    #[test]
    fn repeated_target_token_in_one_sentence() {
        // |f| counts tokens, not types
        let mut t = ProbTable::new();
        initialize(&SentencePair::from_text("a", "x x y"), &mut t);
        assert_abs_diff_eq!(t.get("a", "x"), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.get("a", "y"), 1.0 / 3.0, epsilon = 1e-12);
    }
}
