//! Keyword-based intent classification and the closed category set.

use std::fmt;

use serde::Serialize;

use super::fields::Fields;

/// What a lead is about; selects sender address and auto-reply template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Volunteer,
    Donor,
    Sponsor,
    Collaboration,
    Newsletter,
    Default,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Donor => "donor",
            Self::Sponsor => "sponsor",
            Self::Collaboration => "collaboration",
            Self::Newsletter => "newsletter",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword sets in priority order; the first set with any hit wins.
const INTENT_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Volunteer, &["volunteer"]),
    (Category::Donor, &["donate", "donation", "donor"]),
    (Category::Sponsor, &["sponsor", "sponsorship"]),
    (Category::Collaboration, &["collaborate", "collaboration", "partner"]),
];

/// Classify a form by substring matches over all of its values.
pub fn classify(fields: &Fields) -> Category {
    let blob = fields
        .values()
        .flat_map(|v| v.items())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| blob.contains(k)))
        .map_or(Category::Default, |(category, _)| *category)
}
