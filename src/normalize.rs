//! Ordered-candidate field lookup over loosely shaped backend records.
//!
//! Producers disagree on key names (`fullName` vs `name`, `id` vs
//! `EmployeeID`), so every inconsistent field is read through an explicit
//! precedence list. Lookups never fail: an absent, `null` or mistyped value
//! yields the caller's fallback.

use serde_json::Value;

pub const PLACEHOLDER: &str = "N/A";

/// Precedence lists for fields whose key differs between producers.
pub mod keys {
    pub const FACULTY_ID: &[&str] = &["id", "EmployeeID"];
    pub const FACULTY_NAME: &[&str] = &["fullName", "name"];
    pub const FACULTY_DEPARTMENT: &[&str] = &["department", "dept", "Department"];
    pub const SUBMISSION_DEPARTMENT: &[&str] = &["id", "dept"];
    pub const SUBMISSION_HOD: &[&str] = &["hod", "hodName"];
    pub const STUDENT_REG_NO: &[&str] = &["regNo", "usn"];
}

/// Builds a typed value from a backend record without failing.
pub trait FromRecord: Sized {
    fn from_record(record: &Value) -> Self;
}

impl<T: FromRecord> FromRecord for Vec<T> {
    fn from_record(record: &Value) -> Self {
        match record {
            Value::Array(items) => items.iter().map(T::from_record).collect(),
            _ => Vec::new(),
        }
    }
}

/// First candidate key present on `record` with a non-null value.
pub fn resolve<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    candidates
        .iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
}

pub fn resolve_str(record: &Value, candidates: &[&str], fallback: &str) -> String {
    resolve_opt_str(record, candidates).unwrap_or_else(|| fallback.to_string())
}

/// Like [`resolve_str`] but keeps absence visible. Empty strings count as
/// present.
pub fn resolve_opt_str(record: &Value, candidates: &[&str]) -> Option<String> {
    match resolve(record, candidates)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn resolve_f64(record: &Value, candidates: &[&str], fallback: f64) -> f64 {
    match resolve(record, candidates) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(fallback),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(fallback),
        _ => fallback,
    }
}

/// Non-negative whole count; negative or fractional input is truncated
/// toward zero.
pub fn resolve_count(record: &Value, candidates: &[&str]) -> u64 {
    let value = resolve_f64(record, candidates, 0.0);
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

pub fn resolve_bool(record: &Value, candidates: &[&str], fallback: bool) -> bool {
    match resolve(record, candidates) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().map_or(fallback, |n| n != 0.0),
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            _ => fallback,
        },
        _ => fallback,
    }
}

/// Nested object under `key`, or `Value::Null` when absent.
pub fn child<'a>(record: &'a Value, key: &str) -> &'a Value {
    record.get(key).unwrap_or(&Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_second_candidate_when_first_missing() {
        let record = json!({"EmployeeID": "E1"});
        assert_eq!(resolve_str(&record, &["id", "EmployeeID"], "N/A"), "E1");
    }

    #[test]
    fn empty_record_falls_back() {
        assert_eq!(resolve_str(&json!({}), &["id", "EmployeeID"], "N/A"), "N/A");
        assert_eq!(resolve_str(&json!(null), &["id"], "N/A"), "N/A");
        assert_eq!(resolve_str(&json!([1, 2]), &["id"], "N/A"), "N/A");
    }

    #[test]
    fn precedence_follows_candidate_order() {
        let record = json!({"name": "short", "fullName": "Dr. Long Name"});
        assert_eq!(resolve_str(&record, keys::FACULTY_NAME, PLACEHOLDER), "Dr. Long Name");
    }

    #[test]
    fn null_is_treated_as_absent() {
        let record = json!({"id": null, "EmployeeID": 42});
        assert_eq!(resolve_str(&record, keys::FACULTY_ID, PLACEHOLDER), "42");
    }

    #[test]
    fn empty_string_is_present() {
        let record = json!({"fullName": "", "name": "Backup"});
        assert_eq!(resolve_str(&record, keys::FACULTY_NAME, PLACEHOLDER), "");
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let record = json!({"passPercentage": "72.5", "count": -3, "bad": "abc"});
        assert_eq!(resolve_f64(&record, &["passPercentage"], 0.0), 72.5);
        assert_eq!(resolve_count(&record, &["count"]), 0);
        assert_eq!(resolve_f64(&record, &["bad"], 1.5), 1.5);
    }

    #[test]
    fn booleans_tolerate_loose_encodings() {
        let record = json!({"a": "yes", "b": 0, "c": {"nested": true}});
        assert!(resolve_bool(&record, &["a"], false));
        assert!(!resolve_bool(&record, &["b"], true));
        assert!(resolve_bool(&record, &["c"], true));
    }

    #[test]
    fn vec_from_non_array_is_empty() {
        struct Id(String);
        impl FromRecord for Id {
            fn from_record(record: &Value) -> Self {
                Id(resolve_str(record, &["id"], PLACEHOLDER))
            }
        }

        let ids = Vec::<Id>::from_record(&json!([{"id": "a"}, {}]));
        let ids: Vec<String> = ids.into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec!["a".to_string(), "N/A".to_string()]);
        assert!(Vec::<Id>::from_record(&json!({"id": "a"})).is_empty());
    }
}
