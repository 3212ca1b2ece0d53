//! Domain logic and core data structures
//!
//! Pure conversion logic with no knowledge of threads, terminals or
//! screens.

pub mod base;
pub mod converter;
pub mod input;

pub use base::TargetBase;
pub use converter::{ConversionResult, Converter, ParseFailure, convert};
pub use input::{InputError, NumericInput};
