//! Document store collaborator
//!
//! The admin operations never talk to a database driver directly; they
//! produce validated filter and update documents and hand them to this
//! trait. Implementations (a real driver binding, an in-memory fake for
//! tests) live outside this crate.

use serde_json::Value;
use thiserror::Error;

/// Collection names used by the admin panel
pub mod collections {
    pub const USERS: &str = "users";
    pub const COMPANIES: &str = "companies";
    pub const CONVERSATIONS: &str = "conversations";
    pub const CONVERSATION_SUMMARIES: &str = "conversation_summaries";
    pub const PASSWORD_RESETS: &str = "password_resets";
    pub const ENTERPRISE_REQUESTS: &str = "enterprise_requests";
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a document store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database reported a failure
    #[error("store backend error: {0}")]
    Backend(String),

    /// The named collection does not exist
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

/// Minimal document-database surface consumed by the admin operations.
///
/// Filters and updates are JSON documents produced by the secure query
/// builder; implementations must treat them as opaque.
pub trait DocumentStore {
    fn find(&self, collection: &str, filter: &Value) -> StoreResult<Vec<Value>>;

    fn find_one(&self, collection: &str, filter: &Value) -> StoreResult<Option<Value>>;

    fn count(&self, collection: &str, filter: &Value) -> StoreResult<u64>;

    fn insert_one(&self, collection: &str, document: Value) -> StoreResult<()>;

    /// Returns the number of documents modified
    fn update_one(&self, collection: &str, filter: &Value, update: &Value) -> StoreResult<u64>;

    /// Returns the number of documents modified
    fn update_many(&self, collection: &str, filter: &Value, update: &Value) -> StoreResult<u64>;

    /// Returns the number of documents removed
    fn delete_one(&self, collection: &str, filter: &Value) -> StoreResult<u64>;

    /// Returns the number of documents removed
    fn delete_many(&self, collection: &str, filter: &Value) -> StoreResult<u64>;
}
