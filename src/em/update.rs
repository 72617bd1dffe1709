//!
//! E-step: soft counts of `(e, f)` co-occurrences
//!
//! For each target token `f` of a sentence pair, the credit of generating `f`
//! (which sums to 1) is shared among the source tokens `e` of the pair in
//! proportion to the current `t(f|e)`.
//!
use crate::common::{is_one, Prob};
use crate::corpus::{Corpus, SentencePair};
use crate::table::ProbTable;
use rayon::prelude::*;

///
/// Accumulate the soft counts of the sentence pair into `counts`.
///
/// `table` is the current (normalized) estimate and is only read.
/// If no source word of the pair has mass on `f`, every `(e, f)` receives
/// zero credit. The cell is still stored so that the key set is preserved.
///
pub fn update(pair: &SentencePair, table: &ProbTable, counts: &mut ProbTable) {
    for f in pair.target.iter() {
        let probs: Vec<Prob> = pair.source.iter().map(|e| table.get(e, f)).collect();
        let total: Prob = probs.iter().sum();
        for (e, &p) in pair.source.iter().zip(probs.iter()) {
            let credit = if total <= 0.0 {
                0.0
            } else if is_one(total) {
                p
            } else {
                p / total
            };
            counts.accumulate(e, f, credit);
        }
    }
}

///
/// Soft counts of all the sentence pairs, into a fresh table.
///
pub fn update_corpus(corpus: &Corpus, table: &ProbTable) -> ProbTable {
    let mut counts = ProbTable::new();
    for pair in corpus.iter() {
        update(pair, table, &mut counts);
    }
    counts
}

///
/// `update_corpus` with rayon parallel calculation.
///
/// Each worker accumulates into its own partial table and the partial tables
/// are merged by summation. The result equals `update_corpus` up to the
/// rounding of the summation order.
///
pub fn update_corpus_parallel(corpus: &Corpus, table: &ProbTable) -> ProbTable {
    corpus
        .pairs
        .par_iter()
        .fold(ProbTable::new, |mut counts, pair| {
            update(pair, table, &mut counts);
            counts
        })
        .reduce(ProbTable::new, |mut a, b| {
            a += &b;
            a
        })
}
