//! Case generation
//!
//! Synthesizes request cases from operation schemas. Positive cases
//! satisfy the declared schema; negative cases take a positive instance
//! and apply a single deliberate violation. Generation is driven by a
//! seedable RNG so failing runs can be reproduced.

mod case;
mod generator;

pub use case::{Case, Mode};
pub use generator::Generator;

#[cfg(test)]
mod tests;
