use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;
use crate::{Error, Result};

/// Website value meaning "this restaurant has no website"
pub const NO_WEBSITE: &str = "#";

/// Feature tags of a single restaurant, in source order
pub type FeatureTags = SmallVec<[String; 4]>;

/// One restaurant's static descriptive data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub name: String,
    pub cuisine: String,
    /// Symbolic price tier such as `$`, `$$` or `$$$`
    pub price_range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub features: FeatureTags,
    /// Relative filename under `images/restaurants/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub map_link: String,
    #[serde(default = "default_website")]
    pub website: String,
}

fn default_website() -> String {
    NO_WEBSITE.to_string()
}

impl RestaurantRecord {
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price_range: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            price_range: price_range.into(),
            description: String::new(),
            address: String::new(),
            features: FeatureTags::new(),
            image: None,
            map_link: String::new(),
            website: default_website(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_features<I, T>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_map_link(mut self, map_link: impl Into<String>) -> Self {
        self.map_link = map_link.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// The website URL, or `None` when the record carries the no-website sentinel
    pub fn website_url(&self) -> Option<&str> {
        if self.website == NO_WEBSITE {
            None
        } else {
            Some(&self.website)
        }
    }

    #[inline]
    pub fn has_feature(&self, tag: &str) -> bool {
        self.features.iter().any(|f| f == tag)
    }
}

/// The JSON document the dining guide is loaded from: `{ "restaurants": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantDocument {
    pub restaurants: Vec<RestaurantRecord>,
}

impl RestaurantDocument {
    /// Parse and validate a document, preserving record order
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let doc: RestaurantDocument = serde_json::from_slice(bytes)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> Result<()> {
        for (index, record) in self.restaurants.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(Error::InvalidRecord {
                    index,
                    reason: "name must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Consume the document into shared, immutable records
    pub fn into_records(self) -> Vec<Arc<RestaurantRecord>> {
        self.restaurants.into_iter().map(Arc::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_document() {
        let json = br##"{
            "restaurants": [
                {
                    "name": "Pelican Grill",
                    "cuisine": "Seafood",
                    "priceRange": "$$",
                    "description": "Fresh catch on the river",
                    "address": "1 Flagler Ave",
                    "features": ["waterfront", "bar"],
                    "image": "pelican.jpg",
                    "mapLink": "https://maps.example/pelican",
                    "website": "#"
                }
            ]
        }"##;

        let doc = RestaurantDocument::from_slice(json).unwrap();
        assert_eq!(doc.restaurants.len(), 1);

        let record = &doc.restaurants[0];
        assert_eq!(record.price_range, "$$");
        assert_eq!(record.map_link, "https://maps.example/pelican");
        assert_eq!(record.image.as_deref(), Some("pelican.jpg"));
        assert!(record.has_feature("bar"));
        assert!(!record.has_feature("wine-bar"));
        assert_eq!(record.website_url(), None);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = br#"{"restaurants": [{"name": "Taco Shack", "cuisine": "Mexican", "priceRange": "$"}]}"#;
        let doc = RestaurantDocument::from_slice(json).unwrap();
        let record = &doc.restaurants[0];

        assert!(record.features.is_empty());
        assert!(record.image.is_none());
        assert_eq!(record.website, NO_WEBSITE);
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = br#"{"restaurants": [
            {"name": "Ok", "cuisine": "Cafe", "priceRange": "$"},
            {"name": "  ", "cuisine": "Cafe", "priceRange": "$"}
        ]}"#;

        assert!(matches!(
            RestaurantDocument::from_slice(json),
            Err(Error::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            RestaurantDocument::from_slice(b"{\"restaurants\": 3}"),
            Err(Error::Serialization(_))
        ));
        assert!(RestaurantDocument::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_website_url() {
        let with_site = RestaurantRecord::new("A", "Cafe", "$").with_website("https://a.example");
        assert_eq!(with_site.website_url(), Some("https://a.example"));

        let without = RestaurantRecord::new("B", "Cafe", "$");
        assert_eq!(without.website_url(), None);
    }
}
