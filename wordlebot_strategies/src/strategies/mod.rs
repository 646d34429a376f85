//! The guess-selection strategies.
//!
//! Each strategy consists of a single struct, and everything needed to
//! configure the strategy exists as a method on it.

mod entropy;
pub use entropy::Entropy;

mod minimax;
pub use minimax::Minimax;

mod frequency;
pub use frequency::Frequency;

mod hybrid;
pub use hybrid::Hybrid;
