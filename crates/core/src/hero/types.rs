//! Hero content types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Homepage banner content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Database id; `0` for the built-in fallback.
    pub id: i32,
    /// Leading headline text.
    pub title: String,
    /// Emphasised part of the headline.
    pub title_highlight: String,
    /// Paragraph under the headline.
    pub description: String,
    /// Primary call-to-action label.
    pub cta_primary_text: String,
    /// Primary call-to-action target.
    pub cta_primary_link: String,
    /// Secondary call-to-action label.
    pub cta_secondary_text: String,
    /// Secondary call-to-action target.
    pub cta_secondary_link: String,
    /// Whether this record is shown on the homepage.
    pub is_active: bool,
    /// Creation time. `None` only for the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time. `None` only for the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HeroContent {
    /// Id reported by the fallback content.
    pub const FALLBACK_ID: i32 = 0;

    /// Content served when no record is active. Never persisted.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: Self::FALLBACK_ID,
            title: "Innovating".to_string(),
            title_highlight: "Nanophotonics".to_string(),
            description: "Ph.D. student at POSTECH, specializing in nanofabrication and \
                          metasurfaces for next-gen optical applications like VR/AR and \
                          optical computing."
                .to_string(),
            cta_primary_text: "Explore Research".to_string(),
            cta_primary_link: "/research".to_string(),
            cta_secondary_text: "View CV".to_string(),
            cta_secondary_link: "/cv".to_string(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Payload for creating hero content.
///
/// Ids and timestamps are assigned server-side, so they are not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeroContentInput {
    /// Leading headline text.
    pub title: String,
    /// Emphasised part of the headline.
    pub title_highlight: String,
    /// Paragraph under the headline.
    pub description: String,
    /// Primary call-to-action label.
    pub cta_primary_text: String,
    /// Primary call-to-action target.
    pub cta_primary_link: String,
    /// Secondary call-to-action label.
    pub cta_secondary_text: String,
    /// Secondary call-to-action target.
    pub cta_secondary_link: String,
    /// Activate on creation.
    #[serde(default)]
    pub is_active: bool,
}

/// Partial update. Only fields that are `Some` overwrite the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeroContentPatch {
    /// New headline text.
    pub title: Option<String>,
    /// New emphasised headline part.
    pub title_highlight: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New primary CTA label.
    pub cta_primary_text: Option<String>,
    /// New primary CTA target.
    pub cta_primary_link: Option<String>,
    /// New secondary CTA label.
    pub cta_secondary_text: Option<String>,
    /// New secondary CTA target.
    pub cta_secondary_link: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl HeroContentPatch {
    /// Returns true if this patch turns an inactive record active.
    #[must_use]
    pub fn activates(&self, current: &HeroContent) -> bool {
        self.is_active == Some(true) && !current.is_active
    }

    /// Writes the present fields onto `hero`.
    pub fn apply_to(self, hero: &mut HeroContent) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut hero.title, self.title);
        set(&mut hero.title_highlight, self.title_highlight);
        set(&mut hero.description, self.description);
        set(&mut hero.cta_primary_text, self.cta_primary_text);
        set(&mut hero.cta_primary_link, self.cta_primary_link);
        set(&mut hero.cta_secondary_text, self.cta_secondary_text);
        set(&mut hero.cta_secondary_link, self.cta_secondary_link);
        set(&mut hero.is_active, self.is_active);
    }
}

/// A record ready for insertion, with server timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroContent {
    /// Client-supplied content.
    pub content: HeroContentInput,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` on insert.
    pub updated_at: DateTime<Utc>,
}

impl NewHeroContent {
    /// Stamps `input` with the given creation time.
    #[must_use]
    pub fn stamped(content: HeroContentInput, now: DateTime<Utc>) -> Self {
        Self {
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
