//!
//! M-step: rescale each row of `t(f|e)` into a distribution
//!
use crate::common::is_one;
use crate::table::ProbTable;
use log::trace;

///
/// Normalize the rows of the given source words so that each sums to 1.
///
/// * rows already summing to 1 (within `PROB_TOLERANCE`) are kept as is.
/// * rows summing to 0 (including source words absent from the table) stay empty.
///
pub fn normalize<'a, I>(source_words: I, table: &mut ProbTable)
where
    I: IntoIterator<Item = &'a str>,
{
    for e in source_words {
        let total = table.row_sum(e);
        if total <= 0.0 {
            trace!("normalize: row of `{}` has no mass", e);
            continue;
        }
        if !is_one(total) {
            table.divide_row(e, total);
        }
    }
}
