//! Bracket layout resolution
//!
//! This crate turns a bracket description (competitor count and elimination
//! mode) into the positional skeleton a renderer walks:
//! - Columns of round slots (winners, losers, championship and placeholder)
//! - Match and result coordinates, tagged with the bracket half they belong to
//! - The spacer sequence between structural units
//!
//! Match content (names, scores, commentary text) is never held here. Every
//! emitted record is a coordinate into data owned by the caller.
//!
//! # Usage
//!
//! ```
//! use bracket_layout::{resolve, BracketSpec, EliminationMode, Orientation};
//!
//! let spec = BracketSpec::new(8, EliminationMode::Double).with_orientation(Orientation::Right);
//! let layout = resolve(spec).unwrap();
//! assert_eq!(layout.columns.len(), 6);
//! assert_eq!(layout.results.result_indices, vec![1, 2]);
//! ```

mod error;
mod resolver;
mod topology;
mod types;
mod walk;

pub use error::*;
pub use resolver::*;
pub use topology::*;
pub use types::*;
pub use walk::*;
