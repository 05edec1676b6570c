//! Display mapping
//!
//! Turns records into [`DisplayUnit`]s and describes what the restaurant grid
//! currently shows. Nothing here produces markup; see [`crate::html`].

use serde::Serialize;
use crate::{FeatureVocabulary, RestaurantRecord};

/// Directory restaurant images are served from
pub const IMAGE_DIR: &str = "images/restaurants";

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/400x200/1E5AA8/FFFFFF?text=";

/// A link rendered on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

/// Everything one restaurant card shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUnit {
    pub name: String,
    pub cuisine: String,
    /// Lower-cased cuisine, used as a card attribute
    pub cuisine_key: String,
    pub description: String,
    pub price: String,
    pub address: String,
    pub feature_labels: Vec<String>,
    /// Image URLs in paint order: the restaurant's own image first, then
    /// the placeholder
    pub image_layers: Vec<String>,
    pub directions: Link,
    pub website: Option<Link>,
}

impl DisplayUnit {
    pub fn from_record(record: &RestaurantRecord, vocabulary: &FeatureVocabulary) -> Self {
        let feature_labels = record
            .features
            .iter()
            .map(|tag| vocabulary.label(tag).to_string())
            .collect();

        let mut image_layers = Vec::with_capacity(2);
        if let Some(image) = record.image.as_deref().filter(|i| !i.is_empty()) {
            image_layers.push(format!("{}/{}", IMAGE_DIR, image));
        }
        image_layers.push(placeholder_url(&record.name));

        Self {
            name: record.name.clone(),
            cuisine: record.cuisine.clone(),
            cuisine_key: record.cuisine.to_lowercase(),
            description: record.description.clone(),
            price: record.price_range.clone(),
            address: record.address.clone(),
            feature_labels,
            image_layers,
            directions: Link {
                label: "Directions",
                href: record.map_link.clone(),
            },
            website: record.website_url().map(|url| Link {
                label: "Website",
                href: url.to_string(),
            }),
        }
    }

    /// Links in display order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::once(&self.directions).chain(self.website.as_ref())
    }
}

fn placeholder_url(name: &str) -> String {
    format!("{}{}", PLACEHOLDER_BASE, urlencoding::encode(name))
}

/// What the restaurant grid shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum GridState {
    /// Nothing loaded yet
    Loading,
    /// The load failed; the grid shows a static apology
    LoadFailed,
    /// Loaded, but nothing matches the criteria
    NoResults,
    Cards(Vec<DisplayUnit>),
}

impl GridState {
    /// Map a result set to a grid state; an empty set is `NoResults`
    pub fn from_records<'a, I>(records: I, vocabulary: &FeatureVocabulary) -> Self
    where
        I: IntoIterator<Item = &'a RestaurantRecord>,
    {
        let cards: Vec<DisplayUnit> = records
            .into_iter()
            .map(|r| DisplayUnit::from_record(r, vocabulary))
            .collect();
        if cards.is_empty() {
            GridState::NoResults
        } else {
            GridState::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[DisplayUnit] {
        match self {
            GridState::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// Heading and hint for the message states
    pub fn message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            GridState::Loading => Some(("Loading restaurants", "One moment please.")),
            GridState::LoadFailed => Some(("Unable to load restaurants", "Please try again later.")),
            GridState::NoResults => Some(("No restaurants found", "Try adjusting your search or filters.")),
            GridState::Cards(_) => None,
        }
    }
}

/// `Showing N restaurant(s)`, singular only for exactly one
pub fn results_count_label(count: usize) -> String {
    format!("Showing {} restaurant{}", count, if count == 1 { "" } else { "s" })
}
