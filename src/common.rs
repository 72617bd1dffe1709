//!
//! Shared types and numerical helpers
//!

/// A word token of either language
pub type Word = String;

/// probability (or an unnormalized weight, depending on the stage of training)
pub type Prob = f64;

///
/// Tolerance used when checking whether a sum of probabilities equals 1.
///
pub const PROB_TOLERANCE: Prob = 1e-9;

///
/// `x == 1` within `PROB_TOLERANCE`
///
pub fn is_one(x: Prob) -> bool {
    abs_diff_eq!(x, 1.0, epsilon = PROB_TOLERANCE)
}
