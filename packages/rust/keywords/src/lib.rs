//! Keyword extraction clients.
//!
//! Currently backed by IBM Watson Natural Language Understanding. One call
//! analyzes one span of text; callers decide how calls are sequenced.

mod watson;

pub use watson::WatsonKeywordExtractor;
