//! User administration operations
//!
//! The non-GUI data path of the user tab: collect raw field values,
//! route them through the secure query builder, and hand the resulting
//! documents to the store. Every operation runs under the guard, so a
//! rejected value or a rate-limit denial never reaches the database.

use admin_security_rs::prelude::*;
use serde_json::{json, Map, Value};

use crate::error::AdminOpError;
use crate::store::{collections, DocumentStore};

/// Summary of a cascading user deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDeletion {
    pub conversations_removed: u64,
    pub summaries_removed: u64,
    pub user_removed: bool,
}

/// Guarded operations over the users collection
pub struct UserAdmin<'a, S: DocumentStore> {
    store: &'a S,
    guard: &'a OperationGuard,
}

impl<'a, S: DocumentStore> UserAdmin<'a, S> {
    pub fn new(store: &'a S, guard: &'a OperationGuard) -> Self {
        Self { store, guard }
    }

    /// Search users by email or name.
    ///
    /// The term is sanitized as a search field and matched literally:
    /// each clause is a regex filter whose value has been escaped, so a
    /// term like `.*` finds users with a literal `.*` in the field
    /// rather than everyone.
    pub fn search_users(
        &self,
        actor_id: Option<&str>,
        term: &str,
    ) -> SecurityResult<Vec<Value>> {
        self.guard
            .run(actor_id, "search_users", "search_term", || {
                let sanitized =
                    validate_and_sanitize(Some(term), FieldType::Search, false, false)?
                        .to_lowercase();

                if sanitized.is_empty() {
                    let everyone = Value::Object(Map::new());
                    return self
                        .store
                        .find(collections::USERS, &everyone)
                        .map_err(AdminOpError::from);
                }

                let needle = Value::String(sanitized);
                let clauses: Vec<Value> = ["email", "firstName", "lastName"]
                    .iter()
                    .map(|field| build_filter(field, &needle, FilterOp::Regex))
                    .collect::<Result<_, _>>()?;

                self.store
                    .find(collections::USERS, &json!({ "$or": clauses }))
                    .map_err(AdminOpError::from)
            })
    }

    /// Apply edited form fields to one user document
    pub fn update_user(
        &self,
        actor_id: Option<&str>,
        user_id: &str,
        fields: &[(&str, &str)],
    ) -> SecurityResult<u64> {
        self.guard.run(actor_id, "save_user", "user_data", || {
            let update = build_update_document(fields)?;
            let filter = user_filter(user_id)?;

            self.store
                .update_one(
                    collections::USERS,
                    &filter,
                    &json!({ "$set": Value::Object(update) }),
                )
                .map_err(AdminOpError::from)
        })
    }

    /// Delete a user and the documents that depend on it.
    ///
    /// Cleanup order matches the panel's manual procedure: conversation
    /// data first, then company membership, then password resets, and
    /// the user document last so a failed cascade never leaves an
    /// orphaned user pointing at removed data.
    pub fn delete_user(
        &self,
        actor_id: Option<&str>,
        user_id: &str,
    ) -> SecurityResult<UserDeletion> {
        self.guard.run(actor_id, "delete_user", "user_id", || {
            let safe_id =
                validate_and_sanitize(Some(user_id), FieldType::Text, true, false)?;
            let by_user = build_filter("userId", &json!(safe_id), FilterOp::Eq)?;

            let conversations_removed = self
                .store
                .delete_many(collections::CONVERSATIONS, &by_user)?;
            let summaries_removed = self
                .store
                .delete_many(collections::CONVERSATION_SUMMARIES, &by_user)?;

            // Pull the user out of any company roster and drop admin
            // references to it.
            let everyone = Value::Object(Map::new());
            self.store.update_many(
                collections::COMPANIES,
                &everyone,
                &json!({ "$pull": { "users": safe_id } }),
            )?;
            self.store.update_many(
                collections::COMPANIES,
                &build_filter("admin", &json!(safe_id), FilterOp::Eq)?,
                &json!({ "$unset": { "admin": "" } }),
            )?;

            self.store
                .delete_many(collections::PASSWORD_RESETS, &by_user)?;

            let removed = self
                .store
                .delete_one(collections::USERS, &user_filter(&safe_id)?)?;

            Ok::<_, AdminOpError>(UserDeletion {
                conversations_removed,
                summaries_removed,
                user_removed: removed > 0,
            })
        })
    }
}

fn user_filter(user_id: &str) -> SecurityResult<Value> {
    build_filter("_id", &json!(user_id), FilterOp::Eq)
}
