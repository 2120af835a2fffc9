//! # Admin Operations Library
//!
//! The non-GUI data path of the SalesBuddy admin panel: user and company
//! administration built on top of `admin-security-rs`. Raw form values go
//! through the secure query builder, the resulting documents go to an
//! opaque document store, and every operation runs under the operation
//! guard so rejected input and rate-limit denials never reach the
//! database.
//!
//! ## Features
//!
//! - `DocumentStore` trait abstracting the backing database
//! - Guarded user operations: search, update, cascading delete
//! - Guarded company operations: search, update, cascading delete
//! - Environment-derived configuration, including the database name

pub mod companies;
pub mod config;
pub mod error;
pub mod store;
pub mod users;

#[cfg(test)]
mod testutil;

pub use companies::{CompanyAdmin, CompanyDeletion};
pub use config::AdminConfig;
pub use error::{AdminOpError, AdminOpResult};
pub use store::{collections, DocumentStore, StoreError, StoreResult};
pub use users::{UserAdmin, UserDeletion};

/// Version of the operations library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
