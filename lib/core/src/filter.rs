// Restaurant filtering: search term, cuisine, price tier and feature tag
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::RestaurantRecord;

/// Selector value meaning "no constraint"
pub const ALL: &str = "all";

pub trait Filter {
    fn matches(&self, record: &RestaurantRecord) -> bool;
}

/// The current combination of search/cuisine/price/feature values.
///
/// Deserializes from query strings with every field optional; a missing
/// field is the "no constraint" default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(rename = "search")]
    pub search_term: String,
    pub cuisine: String,
    #[serde(rename = "price")]
    pub price_tier: String,
    #[serde(rename = "feature")]
    pub feature_tag: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            cuisine: ALL.to_string(),
            price_tier: ALL.to_string(),
            feature_tag: ALL.to_string(),
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price_tier = price.into();
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature_tag = feature.into();
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Compile the criteria into a condition; constraints left at their
    /// default are dropped.
    pub fn condition(&self) -> FilterCondition {
        let mut conditions = Vec::with_capacity(4);
        if !self.search_term.is_empty() {
            conditions.push(FilterCondition::Search(self.search_term.to_lowercase()));
        }
        if !is_unconstrained(&self.cuisine) {
            conditions.push(FilterCondition::Cuisine(self.cuisine.to_lowercase()));
        }
        if !is_unconstrained(&self.price_tier) {
            conditions.push(FilterCondition::Price(self.price_tier.clone()));
        }
        if !is_unconstrained(&self.feature_tag) {
            conditions.push(FilterCondition::Feature(self.feature_tag.clone()));
        }
        FilterCondition::And(conditions)
    }
}

// An empty selector value is treated like a missing control
fn is_unconstrained(value: &str) -> bool {
    value == ALL || value.is_empty()
}

/// A compiled predicate over a record. String operands of `Search` and
/// `Cuisine` are already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// Substring of name, cuisine or description
    Search(String),
    Cuisine(String),
    Price(String),
    Feature(String),
    And(Vec<FilterCondition>),
}

impl FilterCondition {
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        match self {
            FilterCondition::Search(term) => {
                record.name.to_lowercase().contains(term.as_str())
                    || record.cuisine.to_lowercase().contains(term.as_str())
                    || record.description.to_lowercase().contains(term.as_str())
            }
            FilterCondition::Cuisine(cuisine) => record.cuisine.to_lowercase() == *cuisine,
            FilterCondition::Price(price) => record.price_range == *price,
            FilterCondition::Feature(tag) => record.has_feature(tag),
            FilterCondition::And(conditions) => conditions.iter().all(|c| c.matches(record)),
        }
    }
}

/// Filter built from [`FilterCriteria`]
pub struct CriteriaFilter {
    condition: FilterCondition,
}

impl CriteriaFilter {
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            condition: criteria.condition(),
        }
    }
}

impl Filter for CriteriaFilter {
    fn matches(&self, record: &RestaurantRecord) -> bool {
        self.condition.matches(record)
    }
}

/// Select the records matching `criteria`, keeping their relative order.
///
/// The result shares the input's records; nothing is copied or modified.
pub fn apply(full: &[Arc<RestaurantRecord>], criteria: &FilterCriteria) -> Vec<Arc<RestaurantRecord>> {
    let filter = CriteriaFilter::new(criteria);
    full.iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}
