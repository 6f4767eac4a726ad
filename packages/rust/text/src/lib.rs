//! Text preparation passes: sanitization, sentence segmentation, truncation.
//!
//! Every function here is pure and total. Nothing in this crate fails or
//! touches the network; the pipeline in `scriptforge-core` wires these passes
//! to the content record.

mod sanitize;
mod segment;
mod truncate;

pub use sanitize::{remove_parentheticals, sanitize, strip_blank_and_marker_lines};
pub use segment::{segment, sentences_from};
pub use truncate::truncate;
