//! API resource implementations for the catalogue client

/// Admin-check resource
pub mod admins;
/// Metadata and document search resources
pub mod search;
/// Tag vocabulary resource
pub mod tags;
/// Tool CRUD resource
pub mod tools;
/// Current-user resource
pub mod users;

pub use admins::Admins;
pub use search::{AiSearch, DocSearch};
pub use tags::Tags;
pub use tools::Tools;
pub use users::Users;
