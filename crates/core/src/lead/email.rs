//! Heuristic scan for the submitter's email address.

use std::sync::LazyLock;

use lettre::Address;
use regex::Regex;

use super::fields::Fields;

/// "Looks like an email" pattern, not RFC validation.
const EMAIL_PATTERN: &str = r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Find the first email address in `fields`.
///
/// Fields whose name contains `email` (any case) are searched first, in body
/// order; only if none of them holds an address are all fields searched.
/// The matched address is returned, not the whole field value. A match only
/// counts if it is also a deliverable address (`a..b@x.org` is not).
pub fn find_email(fields: &Fields) -> Option<String> {
    let named = fields
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains("email"))
        .flat_map(|(_, value)| value.items());

    first_match(named).or_else(|| first_match(fields.values().flat_map(|v| v.items())))
}

fn first_match<'a>(mut items: impl Iterator<Item = &'a String>) -> Option<String> {
    items.find_map(|item| {
        EMAIL_RE
            .find_iter(item)
            .map(|m| m.as_str())
            .find(|candidate| candidate.parse::<Address>().is_ok())
            .map(str::to_string)
    })
}
