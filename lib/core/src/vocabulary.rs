//! Feature tag vocabulary
//!
//! Maps feature tags (`outdoor-seating`) to the labels shown on cards
//! (`Outdoor Seating`). Tags without an entry are shown as-is.

use ahash::AHashMap;
use serde::Serialize;

const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("waterfront", "Waterfront"),
    ("outdoor-seating", "Outdoor Seating"),
    ("family-friendly", "Family Friendly"),
    ("live-music", "Live Music"),
    ("bar", "Full Bar"),
    ("brunch", "Brunch"),
    ("craft-cocktails", "Craft Cocktails"),
    ("quick-service", "Quick Service"),
    ("fine-dining", "Fine Dining"),
    ("historic", "Historic"),
    ("wine-bar", "Wine Bar"),
    ("date-night", "Date Night"),
    ("breakfast", "Breakfast"),
    ("craft-beer", "Craft Beer"),
    ("coffee", "Coffee"),
    ("wifi", "Free WiFi"),
];

#[derive(Debug, Clone)]
pub struct FeatureVocabulary {
    labels: AHashMap<String, String>,
}

/// A single vocabulary entry, as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLabel {
    pub tag: String,
    pub label: String,
}

impl FeatureVocabulary {
    /// An empty vocabulary: every tag is displayed verbatim
    pub fn empty() -> Self {
        Self {
            labels: AHashMap::new(),
        }
    }

    /// The dining guide's built-in labels
    pub fn builtin() -> Self {
        let labels = BUILTIN_LABELS
            .iter()
            .map(|(tag, label)| (tag.to_string(), label.to_string()))
            .collect();
        Self { labels }
    }

    #[must_use]
    pub fn with_label(mut self, tag: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(tag.into(), label.into());
        self
    }

    /// Label for `tag`, falling back to the tag itself
    #[inline]
    pub fn label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.labels.get(tag).map(String::as_str).unwrap_or(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.labels.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All entries sorted by tag
    pub fn entries(&self) -> Vec<FeatureLabel> {
        let mut entries: Vec<FeatureLabel> = self
            .labels
            .iter()
            .map(|(tag, label)| FeatureLabel {
                tag: tag.clone(),
                label: label.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.tag.cmp(&b.tag));
        entries
    }
}

impl Default for FeatureVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
