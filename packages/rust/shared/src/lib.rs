//! Shared types, error model, and configuration for docsplice.
//!
//! This crate is the foundation depended on by all other docsplice crates.
//! It provides:
//! - [`DocspliceError`] — the unified error type
//! - Domain types ([`Language`], [`Sample`], [`SampleSet`], [`ApiVersion`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, ApiOutput, AppConfig, BuildConfig, CONFIG_FILE_NAME, PapersConfig, PathsConfig,
    SamplesConfig, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{DocspliceError, Result};
pub use types::{ApiVersion, Language, Sample, SampleSet};
