//! Layered configuration for the tool catalogue client.
//!
//! - [`CatalogueSettings`]: root configuration with one section per concern
//! - [`load_merged`]: global + local JSON files, then environment overrides
//! - [`schema`]: JSON Schema for editor autocomplete
//! - [`validation`]: advisory warnings that never block loading
//!
//! # Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/catalogue/catalogue.json`)
//! 3. Local config (`./catalogue.json`)
//! 4. Environment variables
//!
//! # Example
//! ```no_run
//! use catalogue_config::load_merged;
//! use std::path::Path;
//!
//! let loaded = load_merged(Path::new(".")).unwrap();
//! println!("API: {}", loaded.config.api.base_url);
//!
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {warning}");
//! }
//! ```
//!
//! # Environment Variables
//! - `CATALOGUE_API_BASE`: Override the API base URL
//! - `CATALOGUE_TOKEN`: Bearer token (env-only, never written to disk)
//! - `CATALOGUE_DEV_MODE`: Treat every user as an admin ("true" or "1")
//! - `CATALOGUE_AUTH_BYPASS`: Skip login with a synthetic admin ("true" or "1")
//! - `CATALOGUE_LOG_LEVEL`: Override log level
//! - `CATALOGUE_LOG_JSON`: Enable JSON logging ("true" or "1")

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;
pub mod validation;
pub mod writer;

pub use loader::{LoadedCatalogueConfig, load_merged, load_merged_from};
pub use schema::schema_json_pretty;
pub use types::{CatalogueSettings, DocOnlyMode, TokenStoreKind};
