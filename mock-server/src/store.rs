//! Schemaless document collections, shaped like the backend's storage.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ServerError;

pub type Document = Map<String, Value>;

/// Keys a client update may never overwrite.
const PROTECTED: [&str; 3] = ["_id", "createdAt", "owner"];

/// Insertion-ordered documents keyed by `_id`.
#[derive(Debug, Default, Clone)]
pub struct Collection {
    docs: Vec<Document>,
}

impl Collection {
    /// Assigns `_id` and `createdAt`, then stores a copy.
    pub fn insert(&mut self, mut doc: Document) -> Document {
        doc.insert("_id".to_string(), Uuid::new_v4().to_string().into());
        doc.insert("createdAt".to_string(), now().into());
        self.docs.push(doc.clone());
        doc
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.iter().find(|d| text(d, "_id") == Some(id))
    }

    /// Shallow merge of `patch` into the stored document.
    pub fn update(&mut self, id: &str, patch: Document) -> Option<Document> {
        let doc = self.docs.iter_mut().find(|d| text(d, "_id") == Some(id))?;
        for (key, value) in patch {
            if !PROTECTED.contains(&key.as_str()) {
                doc.insert(key, value);
            }
        }
        doc.insert("updatedAt".to_string(), now().into());
        Some(doc.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let index = self.docs.iter().position(|d| text(d, "_id") == Some(id))?;
        Some(self.docs.remove(index))
    }

    pub fn retain(&mut self, keep: impl FnMut(&Document) -> bool) {
        self.docs.retain(keep);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// String value at `key`, if any.
pub fn text<'a>(doc: &'a Document, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

/// Every field must be present and non-blank (numbers count as present).
pub fn require(doc: &Document, fields: &[&str]) -> Result<(), ServerError> {
    for field in fields {
        let present = match doc.get(*field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Number(_)) => true,
            _ => false,
        };
        if !present {
            return Err(ServerError::required(field));
        }
    }
    Ok(())
}

/// `YYYY-MM-DD` prefix check for date fields that are present.
pub fn require_dates(doc: &Document, fields: &[&str]) -> Result<(), ServerError> {
    for field in fields {
        if let Some(raw) = text(doc, field).filter(|s| !s.trim().is_empty()) {
            let day = raw.get(..10).unwrap_or(raw);
            if chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").is_err() {
                return Err(ServerError::BadRequest(format!("{field} must be a valid date")));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn insert_assigns_id_and_timestamp() {
        let mut pets = Collection::default();
        let stored = pets.insert(doc(json!({"name": "Pamuk"})));
        let id = text(&stored, "_id").unwrap();
        assert_eq!(id.len(), 36);
        assert!(text(&stored, "createdAt").unwrap().ends_with('Z'));
        assert_eq!(pets.get(id).unwrap()["name"], "Pamuk");
    }

    #[test]
    fn update_keeps_protected_keys() {
        let mut pets = Collection::default();
        let stored = pets.insert(doc(json!({"name": "Pamuk", "owner": "u1"})));
        let id = text(&stored, "_id").unwrap().to_string();
        let updated = pets
            .update(&id, doc(json!({"_id": "x", "owner": "u2", "name": "Boncuk"})))
            .unwrap();
        assert_eq!(text(&updated, "_id"), Some(id.as_str()));
        assert_eq!(updated["owner"], "u1");
        assert_eq!(updated["name"], "Boncuk");
    }

    #[test]
    fn require_rejects_blank_strings() {
        let d = doc(json!({"name": "  ", "weight": 4.2}));
        assert_eq!(require(&d, &["weight"]), Ok(()));
        assert_eq!(require(&d, &["name"]), Err(ServerError::required("name")));
        assert_eq!(require(&d, &["missing"]), Err(ServerError::required("missing")));
    }

    #[test]
    fn dates_are_checked_when_present() {
        let d = doc(json!({"a": "2024-02-30", "b": "2024-03-01T10:00:00.000Z"}));
        assert!(require_dates(&d, &["a"]).is_err());
        assert!(require_dates(&d, &["b", "absent"]).is_ok());
    }
}
