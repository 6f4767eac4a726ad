//! Shared types, error model, and configuration for ScriptForge.
//!
//! This crate is the foundation depended on by all other ScriptForge crates.
//! It provides:
//! - [`ScriptForgeError`]: the unified error type
//! - Domain types ([`ContentRecord`], [`SentenceRecord`], [`RunId`])
//! - Collaborator traits ([`StateStore`], [`ContentFetcher`], [`KeywordExtractor`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod ports;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContentConfig, ContentProvider, DefaultsConfig, KeywordsConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, read_api_key,
};
pub use error::{Result, ScriptForgeError};
pub use ports::{ContentFetcher, FetchedContent, KeywordExtractor, KeywordOptions, StateStore};
pub use types::{ContentRecord, RunId, SentenceRecord};
