//! Request and response types for the catalogue API

/// Metadata and document search types
pub mod search;
/// Tag statistics
pub mod tag;
/// Tool records and payloads
pub mod tool;
/// User and admin-check types
pub mod user;

pub use search::{
    AiSearchHit, AiSearchResponse, DEFAULT_SEARCH_LIMIT, DocSearchHit, DocSearchResponse,
    SearchParams,
};
pub use tag::{TagCount, TagStats};
pub use tool::{DocMatch, Tool, ToolCreate, ToolUpdate};
pub use user::{AdminCheck, Role, User};
