//! Pipeline orchestration for ScriptForge.
//!
//! This crate ties the text passes from `scriptforge-text` to the injected
//! collaborators (state store, content fetcher, keyword extractor) and runs
//! them in a fixed order over one content record (see [`pipeline::robot`]).

pub mod annotate;
pub mod pipeline;

#[cfg(test)]
mod testing;
