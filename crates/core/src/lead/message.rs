//! Text of the admin-facing notification.

use super::fields::Fields;

/// One `field: value` line per field, in body order.
pub fn format_admin_body(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}: {}", value.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Who the lead is from, for the notification subject.
///
/// The email when known, else `firstName lastName`, else `"Unknown"`.
pub fn submitter_identifier(email: Option<&str>, fields: &Fields) -> String {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        return email.to_string();
    }

    let name = ["firstName", "lastName"]
        .iter()
        .filter_map(|key| fields.get(*key).and_then(|v| v.as_text()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let name = name.trim();
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::fields::FieldValue;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn body_lists_fields_in_order() {
        let f = fields(&[
            ("name", FieldValue::Text("Ada".into())),
            ("days", FieldValue::List(vec!["Mon".into(), "Fri".into()])),
        ]);
        assert_eq!(format_admin_body(&f), "name: Ada\ndays: Mon, Fri");
    }

    #[test]
    fn identifier_prefers_email() {
        let f = fields(&[("firstName", FieldValue::Text("Ada".into()))]);
        assert_eq!(submitter_identifier(Some("a@b.com"), &f), "a@b.com");
    }

    #[test]
    fn identifier_uses_name_parts() {
        let f = fields(&[
            ("lastName", FieldValue::Text("Lovelace".into())),
            ("firstName", FieldValue::Text("Ada".into())),
        ]);
        assert_eq!(submitter_identifier(None, &f), "Ada Lovelace");

        let only_last = fields(&[("lastName", FieldValue::Text("Lovelace".into()))]);
        assert_eq!(submitter_identifier(None, &only_last), "Lovelace");
    }

    #[test]
    fn identifier_unknown() {
        assert_eq!(submitter_identifier(None, &Fields::new()), "Unknown");
    }
}
