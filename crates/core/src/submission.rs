//! Generic form submissions kept in `submissions.json`.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Name of the submissions file.
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// Status given to every new submission.
pub const STATUS_NEW: &str = "new";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: DbId,
    pub form_type: String,
    /// The form payload exactly as the client sent it.
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
    pub status: String,
}

impl FormSubmission {
    /// Build the next submission for `existing`; ids continue past the largest one.
    pub fn next(
        existing: &[FormSubmission],
        form_type: String,
        data: serde_json::Value,
        now: Timestamp,
    ) -> Self {
        let id = existing.iter().map(|s| s.id).max().map_or(1, |max| max + 1);
        Self {
            id,
            form_type,
            data,
            timestamp: now,
            status: STATUS_NEW.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn ids_continue_from_max() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let first = FormSubmission::next(&[], "contact".into(), json!({}), now);
        assert_eq!(first.id, 1);

        let mut later = first.clone();
        later.id = 5;
        let next = FormSubmission::next(&[first, later], "donate".into(), json!({"amount": 5}), now);
        assert_eq!(next.id, 6);
        assert_eq!(next.status, "new");
    }

    #[test]
    fn serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let s = FormSubmission::next(&[], "volunteer".into(), json!({"name": "Ada"}), now);
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["formType"], "volunteer");
        assert_eq!(value["timestamp"], "2025-03-01T12:00:00Z");
    }
}
