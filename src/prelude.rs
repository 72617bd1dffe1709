//!
//! globally-available parts
//!
pub use crate::common::{Prob, Word};
pub use crate::corpus::{Corpus, SentencePair};
pub use crate::em::{train, train_with_logs, train_with_options, TrainOptions};
pub use crate::error::Ibm0Error;
pub use crate::table::ProbTable;
