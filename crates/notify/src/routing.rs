//! Static category table: sender mailbox and auto-reply template per category.

use lifesavers_core::lead::intent::Category;

/// Sender of admin notifications.
pub const ADMIN_FROM: &str = "SAM Life Savers <hello@join.samlifesavers.org>";

/// Auto-reply sender for `category`. `Default` routes like `Collaboration`.
pub fn sender(category: Category) -> &'static str {
    match category {
        Category::Volunteer => "SAM Life Savers <hello@join.samlifesavers.org>",
        Category::Donor => "SAM Life Savers <support@join.samlifesavers.org>",
        Category::Sponsor => "SAM Life Savers <sponsor@join.samlifesavers.org>",
        Category::Collaboration | Category::Default => {
            "SAM Life Savers <collaborations@join.samlifesavers.org>"
        }
        Category::Newsletter => "SAM Life Savers <newsletter@join.samlifesavers.org>",
    }
}

/// Environment variable holding the template id for `category`.
pub fn template_var(category: Category) -> &'static str {
    match category {
        Category::Volunteer => "TEMPLATE_VOLUNTEER",
        Category::Donor => "TEMPLATE_DONOR",
        Category::Sponsor => "TEMPLATE_SPONSOR",
        Category::Collaboration | Category::Default => "TEMPLATE_COLLAB",
        Category::Newsletter => "TEMPLATE_NEWSLETTER",
    }
}

/// Auto-reply template ids configured at the provider.
#[derive(Debug, Clone, Default)]
pub struct TemplateIds {
    pub volunteer: Option<String>,
    pub donor: Option<String>,
    pub sponsor: Option<String>,
    pub collaboration: Option<String>,
    pub newsletter: Option<String>,
}

impl TemplateIds {
    /// Read every `TEMPLATE_*` variable; empty values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            volunteer: var("TEMPLATE_VOLUNTEER"),
            donor: var("TEMPLATE_DONOR"),
            sponsor: var("TEMPLATE_SPONSOR"),
            collaboration: var("TEMPLATE_COLLAB"),
            newsletter: var("TEMPLATE_NEWSLETTER"),
        }
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        let slot = match category {
            Category::Volunteer => &self.volunteer,
            Category::Donor => &self.donor,
            Category::Sponsor => &self.sponsor,
            Category::Collaboration | Category::Default => &self.collaboration,
            Category::Newsletter => &self.newsletter,
        };
        slot.as_deref()
    }
}
