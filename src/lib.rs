pub mod common;
pub mod corpus;
pub mod em;
pub mod error;
pub mod io;
pub mod prelude;
pub mod table;

pub use em::train;
pub use table::ProbTable;

#[macro_use]
extern crate approx;
