//! Shared types, error model, and configuration for docbinder.
//!
//! This crate is the foundation depended on by all other docbinder crates.
//! It provides:
//! - [`DocbinderError`] — the unified error type
//! - Domain types ([`DocMeta`], [`SectionNumber`]) and reserved names
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConvertersConfig, PdfConfig, ScratchConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, write_default_config,
};
pub use error::{DocbinderError, Result};
pub use types::{DocMeta, INDEX_FILENAME, MD_EXT, NO_CONTENT, SECTION_SEPARATOR, SectionNumber};
