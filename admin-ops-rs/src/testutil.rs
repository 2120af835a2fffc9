//! Test doubles for the admin operations
//!
//! `MemoryStore` implements just enough of the document-store surface to
//! exercise the operations: flat documents per collection, equality,
//! literal-regex and `$in` matching, `$or` across clauses, and the
//! `$set`/`$unset`/`$pull` update operators the panel actually issues.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use admin_security_rs::{OperationGuard, RateLimiter};
use regex::Regex;
use serde_json::Value;

use crate::store::{DocumentStore, StoreResult};

/// Guard with a limiter far above anything a test will hit
pub fn guard_for_tests() -> OperationGuard {
    guard_with_capacity(1000)
}

pub fn guard_with_capacity(capacity: usize) -> OperationGuard {
    OperationGuard::new(Arc::new(RateLimiter::new(
        capacity,
        Duration::from_secs(60),
    )))
}

/// In-memory document store with read/write counters
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, documents: Vec<Value>) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    /// Number of find/count calls the operations issued
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of insert/update/delete calls the operations issued
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn matches_filter(document: &Value, filter: &Value) -> bool {
    let clauses = match filter.as_object() {
        Some(clauses) => clauses,
        None => return false,
    };

    clauses.iter().all(|(key, condition)| {
        if key == "$or" {
            return condition
                .as_array()
                .map(|branches| {
                    branches
                        .iter()
                        .any(|branch| matches_filter(document, branch))
                })
                .unwrap_or(false);
        }
        matches_condition(document.get(key.as_str()), condition)
    })
}

fn matches_condition(field_value: Option<&Value>, condition: &Value) -> bool {
    let operators = match condition.as_object() {
        Some(operators) => operators,
        // Bare scalar condition, implicit equality.
        None => return field_value == Some(condition),
    };

    operators.iter().all(|(op, operand)| match op.as_str() {
        "$eq" => field_value == Some(operand),
        "$ne" => field_value != Some(operand),
        "$in" => operand
            .as_array()
            .map(|candidates| {
                field_value.map_or(false, |value| candidates.contains(value))
            })
            .unwrap_or(false),
        "$regex" => match (field_value.and_then(Value::as_str), operand.as_str()) {
            (Some(haystack), Some(pattern)) => Regex::new(pattern)
                .map(|regex| regex.is_match(haystack))
                .unwrap_or(false),
            _ => false,
        },
        _ => false,
    })
}

fn apply_update(document: &mut Value, update: &Value) {
    let operators = match update.as_object() {
        Some(operators) => operators,
        None => return,
    };
    let fields = match document.as_object_mut() {
        Some(fields) => fields,
        None => return,
    };

    for (op, payload) in operators {
        let payload = match payload.as_object() {
            Some(payload) => payload,
            None => continue,
        };
        match op.as_str() {
            "$set" => {
                for (key, value) in payload {
                    fields.insert(key.clone(), value.clone());
                }
            }
            "$unset" => {
                for key in payload.keys() {
                    fields.remove(key);
                }
            }
            "$pull" => {
                for (key, value) in payload {
                    if let Some(Value::Array(items)) = fields.get_mut(key) {
                        items.retain(|item| item != value);
                    }
                }
            }
            _ => {}
        }
    }
}

impl DocumentStore for MemoryStore {
    fn find(&self, collection: &str, filter: &Value) -> StoreResult<Vec<Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filter(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_one(&self, collection: &str, filter: &Value) -> StoreResult<Option<Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches_filter(document, filter))
                .cloned()
        }))
    }

    fn count(&self, collection: &str, filter: &Value) -> StoreResult<u64> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filter(document, filter))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    fn insert_one(&self, collection: &str, document: Value) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    fn update_one(&self, collection: &str, filter: &Value, update: &Value) -> StoreResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        if let Some(documents) = collections.get_mut(collection) {
            if let Some(document) = documents
                .iter_mut()
                .find(|document| matches_filter(document, filter))
            {
                apply_update(document, update);
                return Ok(1);
            }
        }
        Ok(0)
    }

    fn update_many(&self, collection: &str, filter: &Value, update: &Value) -> StoreResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        let mut modified = 0;
        if let Some(documents) = collections.get_mut(collection) {
            for document in documents
                .iter_mut()
                .filter(|document| matches_filter(document, filter))
            {
                apply_update(document, update);
                modified += 1;
            }
        }
        Ok(modified)
    }

    fn delete_one(&self, collection: &str, filter: &Value) -> StoreResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        if let Some(documents) = collections.get_mut(collection) {
            if let Some(index) = documents
                .iter()
                .position(|document| matches_filter(document, filter))
            {
                documents.remove(index);
                return Ok(1);
            }
        }
        Ok(0)
    }

    fn delete_many(&self, collection: &str, filter: &Value) -> StoreResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        let mut removed = 0;
        if let Some(documents) = collections.get_mut(collection) {
            let before = documents.len();
            documents.retain(|document| !matches_filter(document, filter));
            removed = (before - documents.len()) as u64;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matching() {
        let document = json!({"_id": "u1", "email": "ann@example.com", "role": "admin"});

        assert!(matches_filter(&document, &json!({})));
        assert!(matches_filter(&document, &json!({"_id": {"$eq": "u1"}})));
        assert!(!matches_filter(&document, &json!({"_id": {"$eq": "u2"}})));
        assert!(matches_filter(
            &document,
            &json!({"role": {"$in": ["admin", "manager"]}})
        ));
        assert!(matches_filter(
            &document,
            &json!({"email": {"$regex": "ann@example\\.com"}})
        ));
        assert!(matches_filter(
            &document,
            &json!({"$or": [{"_id": {"$eq": "zz"}}, {"role": {"$eq": "admin"}}]})
        ));
    }

    #[test]
    fn test_update_operators() {
        let mut document = json!({"_id": "co1", "admin": "u1", "users": ["u1", "u2"]});
        apply_update(
            &mut document,
            &json!({"$pull": {"users": "u1"}, "$unset": {"admin": ""}, "$set": {"size": "10-50"}}),
        );

        assert_eq!(document.get("users"), Some(&json!(["u2"])));
        assert!(document.get("admin").is_none());
        assert_eq!(document.get("size"), Some(&json!("10-50")));
    }
}
