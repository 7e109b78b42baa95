//! Password generation and output.

pub mod charset;
mod generate;
pub mod output;

pub use charset::CharacterClass;
pub use generate::{GenerateError, generate};
