//!
//! Sparse conditional probability table `t(f|e)`
//!
//! Maps a source word `e` to a distribution (or unnormalized weights) over
//! target words `f`. Cells that were never written read as zero, so callers
//! never have to check for presence before reading or accumulating.
//!
use crate::common::{Prob, Word};
use fnv::FnvHashMap as HashMap;
use std::ops::AddAssign;

/// target word -> weight
pub type Row = HashMap<Word, Prob>;

///
/// Sparse two-level table `source word -> target word -> weight`
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbTable {
    rows: HashMap<Word, Row>,
}

impl ProbTable {
    /// empty table
    pub fn new() -> Self {
        ProbTable {
            rows: HashMap::default(),
        }
    }
    ///
    /// weight of `(source, target)`, or 0 if the pair was never stored.
    ///
    pub fn get(&self, source: &str, target: &str) -> Prob {
        self.rows
            .get(source)
            .and_then(|row| row.get(target))
            .copied()
            .unwrap_or(0.0)
    }
    ///
    /// overwrite the weight of `(source, target)`, creating the cell if needed.
    ///
    pub fn set(&mut self, source: &str, target: &str, value: Prob) {
        *self.cell_mut(source, target) = value;
    }
    ///
    /// add `delta` to the weight of `(source, target)` (absent cells start at 0).
    ///
    pub fn accumulate(&mut self, source: &str, target: &str, delta: Prob) {
        *self.cell_mut(source, target) += delta;
    }
    fn cell_mut(&mut self, source: &str, target: &str) -> &mut Prob {
        self.rows
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert(0.0)
    }
    ///
    /// iterator over `(target, weight)` of the source word.
    /// Empty if the source word is unseen.
    ///
    pub fn row<'a>(&'a self, source: &str) -> impl Iterator<Item = (&'a str, Prob)> + 'a {
        self.rows
            .get(source)
            .into_iter()
            .flat_map(|row| row.iter().map(|(f, &p)| (f.as_str(), p)))
    }
    ///
    /// sum of the weights in the row of the source word
    ///
    pub fn row_sum(&self, source: &str) -> Prob {
        self.row(source).map(|(_, p)| p).sum()
    }
    ///
    /// divide every weight in the row of `source` by `divisor`.
    /// Does nothing if the source word is unseen.
    ///
    pub fn divide_row(&mut self, source: &str, divisor: Prob) {
        if let Some(row) = self.rows.get_mut(source) {
            for p in row.values_mut() {
                *p /= divisor;
            }
        }
    }
    ///
    /// source words that own at least one cell
    ///
    pub fn source_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter(|(_, row)| !row.is_empty())
            .map(|(e, _)| e.as_str())
    }
    /// source words in lexicographic order
    pub fn sorted_source_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.source_words().collect();
        words.sort_unstable();
        words
    }
    ///
    /// all `(source, target, weight)` triples, in arbitrary order
    ///
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Prob)> + '_ {
        self.rows.iter().flat_map(|(e, row)| {
            row.iter()
                .map(move |(f, &p)| (e.as_str(), f.as_str(), p))
        })
    }
    ///
    /// all `(source, target, weight)` triples sorted by source then target word
    ///
    pub fn sorted_entries(&self) -> Vec<(&str, &str, Prob)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        entries
    }
    /// number of source words
    pub fn n_sources(&self) -> usize {
        self.source_words().count()
    }
    /// number of stored cells
    pub fn n_entries(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.n_entries() == 0
    }
    ///
    /// The most probable target word of the source word.
    /// Ties are broken by the lexicographically smallest target word.
    ///
    pub fn best(&self, source: &str) -> Option<(&str, Prob)> {
        self.row(source).fold(None, |best, (f, p)| match best {
            Some((bf, bp)) if bp > p || (bp == p && bf < f) => Some((bf, bp)),
            _ => Some((f, p)),
        })
    }
    ///
    /// largest absolute difference of any cell between the two tables,
    /// treating absent cells as zero.
    ///
    pub fn max_abs_diff(&self, other: &ProbTable) -> Prob {
        let one_side = |a: &ProbTable, b: &ProbTable| {
            a.iter()
                .map(|(e, f, p)| (p - b.get(e, f)).abs())
                .fold(0.0, Prob::max)
        };
        one_side(self, other).max(one_side(other, self))
    }
}

impl AddAssign<&ProbTable> for ProbTable {
    /// cell-wise sum
    fn add_assign(&mut self, other: &ProbTable) {
        for (e, f, p) in other.iter() {
            self.accumulate(e, f, p);
        }
    }
}

impl std::fmt::Display for ProbTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:>10} {:>10}    Probability", "Source", "Target")?;
        writeln!(f, "{}", "-".repeat(33))?;
        for e in self.sorted_source_words() {
            writeln!(f, "{:>10}", e)?;
            let mut row: Vec<(&str, Prob)> = self.row(e).collect();
            row.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (word_f, p) in row {
                writeln!(f, "{:>10} {:>10}      {:0.5}", "", word_f, p)?;
            }
        }
        write!(f, "{}", "-".repeat(33))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_cells_read_as_zero() {
        let t = ProbTable::new();
        assert_eq!(t.get("the", "la"), 0.0);
        assert_eq!(t.row("the").count(), 0);
        assert_eq!(t.row_sum("the"), 0.0);
        assert!(t.is_empty());
        assert_eq!(t.best("the"), None);
    }

    #[test]
    fn accumulate_and_set() {
        let mut t = ProbTable::new();
        t.accumulate("the", "la", 0.5);
        t.accumulate("the", "la", 0.25);
        t.accumulate("the", "maison", 0.25);
        assert_abs_diff_eq!(t.get("the", "la"), 0.75);
        t.set("the", "la", 0.1);
        assert_abs_diff_eq!(t.get("the", "la"), 0.1);
        assert_abs_diff_eq!(t.row_sum("the"), 0.35, epsilon = 1e-12);
        assert_eq!(t.n_entries(), 2);
        assert_eq!(t.n_sources(), 1);
        assert_eq!(t.sorted_source_words(), vec!["the"]);
    }

    #[test]
    fn divide_row_only_touches_that_row() {
        let mut t = ProbTable::new();
        t.set("a", "x", 2.0);
        t.set("a", "y", 6.0);
        t.set("b", "x", 3.0);
        t.divide_row("a", 8.0);
        t.divide_row("missing", 2.0);
        assert_abs_diff_eq!(t.get("a", "x"), 0.25);
        assert_abs_diff_eq!(t.get("a", "y"), 0.75);
        assert_abs_diff_eq!(t.get("b", "x"), 3.0);
        assert_eq!(t.n_sources(), 2);
    }

    #[test]
    fn sorted_entries_and_best() {
        let mut t = ProbTable::new();
        t.set("house", "maison", 0.7);
        t.set("house", "la", 0.3);
        t.set("a", "z", 0.5);
        t.set("a", "b", 0.5);
        let entries = t.sorted_entries();
        assert_eq!(
            entries,
            vec![
                ("a", "b", 0.5),
                ("a", "z", 0.5),
                ("house", "la", 0.3),
                ("house", "maison", 0.7),
            ]
        );
        assert_eq!(t.best("house"), Some(("maison", 0.7)));
        // tie goes to the smaller word
        assert_eq!(t.best("a"), Some(("b", 0.5)));
    }

    #[test]
    fn add_assign_and_diff() {
        let mut a = ProbTable::new();
        a.set("e", "f", 1.0);
        let mut b = ProbTable::new();
        b.set("e", "f", 0.5);
        b.set("e", "g", 0.25);
        assert_abs_diff_eq!(a.max_abs_diff(&b), 0.5);
        assert_abs_diff_eq!(b.max_abs_diff(&a), 0.5);
        a += &b;
        assert_abs_diff_eq!(a.get("e", "f"), 1.5);
        assert_abs_diff_eq!(a.get("e", "g"), 0.25);
        assert_abs_diff_eq!(a.max_abs_diff(&a.clone()), 0.0);
    }

    #[test]
    fn display_layout() {
        let mut t = ProbTable::new();
        t.set("the", "la", 0.5);
        t.set("the", "maison", 0.5);
        let s = t.to_string();
        assert!(s.contains("Probability"));
        assert!(s.contains("       the\n"));
        assert!(s.contains("0.50000"));
        let la = s.find(" la ").unwrap();
        let maison = s.find(" maison ").unwrap();
        assert!(la < maison);
    }
}
