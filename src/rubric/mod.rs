//! Rubric documents and the cached provider that loads them.
//!
//! A rubric file is a JSON object:
//!
//! ```json
//! {
//!   "rubric_id": "default",
//!   "criteria": [
//!     {"id": "c1", "name": "Clarity", "description": "explains reasoning clearly",
//!      "weight": 1.0, "keywords": ["reasoning"], "min_words": 5}
//!   ]
//! }
//! ```
//!
//! Only `id` and `name` are required per criterion; the rest are defaulted.

pub mod error;
pub mod model;
pub mod provider;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::RubricError;
pub use model::{Criterion, Rubric};
pub use provider::RubricProvider;
pub use store::{MemoryRubricStore, RubricStore};
