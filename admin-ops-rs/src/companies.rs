//! Company administration operations
//!
//! Mirrors the user operations for the companies collection. Deleting a
//! company is the most involved cascade in the panel: conversation data
//! for every member goes first, then the enterprise requests, then the
//! members themselves are detached and reverted to individual accounts,
//! and the company document is removed last.

use admin_security_rs::prelude::*;
use serde_json::{json, Map, Value};

use crate::error::AdminOpError;
use crate::store::{collections, DocumentStore};

/// Summary of a cascading company deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDeletion {
    pub conversations_removed: u64,
    pub summaries_removed: u64,
    pub requests_removed: u64,
    pub members_detached: u64,
    pub company_removed: bool,
}

/// Guarded operations over the companies collection
pub struct CompanyAdmin<'a, S: DocumentStore> {
    store: &'a S,
    guard: &'a OperationGuard,
}

impl<'a, S: DocumentStore> CompanyAdmin<'a, S> {
    pub fn new(store: &'a S, guard: &'a OperationGuard) -> Self {
        Self { store, guard }
    }

    /// Search companies by name or industry, matching the term literally
    pub fn search_companies(
        &self,
        actor_id: Option<&str>,
        term: &str,
    ) -> SecurityResult<Vec<Value>> {
        self.guard
            .run(actor_id, "search_companies", "search_term", || {
                let sanitized =
                    validate_and_sanitize(Some(term), FieldType::Search, false, false)?
                        .to_lowercase();

                if sanitized.is_empty() {
                    let everyone = Value::Object(Map::new());
                    return self
                        .store
                        .find(collections::COMPANIES, &everyone)
                        .map_err(AdminOpError::from);
                }

                let needle = Value::String(sanitized);
                let clauses: Vec<Value> = ["name", "industry"]
                    .iter()
                    .map(|field| build_filter(field, &needle, FilterOp::Regex))
                    .collect::<Result<_, _>>()?;

                self.store
                    .find(collections::COMPANIES, &json!({ "$or": clauses }))
                    .map_err(AdminOpError::from)
            })
    }

    /// Apply edited form fields to one company document
    pub fn update_company(
        &self,
        actor_id: Option<&str>,
        company_id: &str,
        fields: &[(&str, &str)],
    ) -> SecurityResult<u64> {
        self.guard
            .run(actor_id, "save_company", "company_data", || {
                let update = build_update_document(fields)?;
                let filter = company_filter(company_id)?;

                self.store
                    .update_one(
                        collections::COMPANIES,
                        &filter,
                        &json!({ "$set": Value::Object(update) }),
                    )
                    .map_err(AdminOpError::from)
            })
    }

    /// Delete a company and everything hanging off it.
    ///
    /// Members are not deleted; they are detached from the company and
    /// reverted to individual accounts, which is what the panel actually
    /// did despite its warning text.
    pub fn delete_company(
        &self,
        actor_id: Option<&str>,
        company_id: &str,
    ) -> SecurityResult<CompanyDeletion> {
        self.guard
            .run(actor_id, "delete_company", "company_id", || {
                let safe_id =
                    validate_and_sanitize(Some(company_id), FieldType::Text, true, false)?;
                let by_id = company_filter(&safe_id)?;

                let company = match self.store.find_one(collections::COMPANIES, &by_id)? {
                    Some(doc) => doc,
                    None => return Ok::<_, AdminOpError>(CompanyDeletion::default()),
                };

                let members: Vec<Value> = company
                    .get("users")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();

                let mut outcome = CompanyDeletion::default();

                if !members.is_empty() {
                    let by_member =
                        build_filter("userId", &Value::Array(members.clone()), FilterOp::In)?;
                    outcome.conversations_removed = self
                        .store
                        .delete_many(collections::CONVERSATIONS, &by_member)?;
                    outcome.summaries_removed = self
                        .store
                        .delete_many(collections::CONVERSATION_SUMMARIES, &by_member)?;
                }

                outcome.requests_removed = self.store.delete_many(
                    collections::ENTERPRISE_REQUESTS,
                    &build_filter("companyId", &json!(safe_id), FilterOp::Eq)?,
                )?;

                if !members.is_empty() {
                    let member_ids =
                        build_filter("_id", &Value::Array(members), FilterOp::In)?;
                    outcome.members_detached = self.store.update_many(
                        collections::USERS,
                        &member_ids,
                        &json!({
                            "$unset": { "companyId": "", "teamId": "" },
                            "$set": {
                                "role": "individual",
                                "isCompanyAdmin": false,
                                "isTeamLeader": false,
                                "companyJoinedAt": null,
                            },
                        }),
                    )?;
                }

                outcome.company_removed =
                    self.store.delete_one(collections::COMPANIES, &by_id)? > 0;

                Ok(outcome)
            })
    }
}

fn company_filter(company_id: &str) -> SecurityResult<Value> {
    build_filter("_id", &json!(company_id), FilterOp::Eq)
}
