//! # NSB Bites Core
//!
//! Core library for the NSB Bites dining guide.
//!
//! This crate provides the data model and the filter/render pipeline:
//!
//! - [`RestaurantRecord`] - One restaurant as loaded from the JSON document
//! - [`Collection`] - The full, ordered, immutable list for one view
//! - [`FilterCriteria`] - Search term, cuisine, price tier and feature tag
//! - [`DisplayUnit`] / [`GridState`] - What a card and the grid show
//! - [`DiningGuide`] / [`FeaturedView`] - Per-view state and event handling
//! - [`CoalescingWindow`] - Trailing-edge debounce for search input
//!
//! ## Example
//!
//! ```rust
//! use nsbbites_core::{Collection, FilterCriteria, RestaurantRecord, results_count_label};
//!
//! let collection = Collection::from_records(vec![
//!     RestaurantRecord::new("Pelican Grill", "Seafood", "$$").with_features(["waterfront", "bar"]),
//!     RestaurantRecord::new("Sunrise Cafe", "Breakfast", "$").with_features(["coffee"]),
//! ]);
//!
//! let criteria = FilterCriteria::new().with_search("grill").with_feature("bar");
//! let matching = collection.apply(&criteria);
//!
//! assert_eq!(matching.len(), 1);
//! assert_eq!(results_count_label(matching.len()), "Showing 1 restaurant");
//! ```

pub mod collection;
pub mod error;
pub mod record;
pub mod vocabulary;
pub mod filter;
pub mod display;
pub mod html;
pub mod coalesce;
pub mod view;

pub use collection::Collection;
pub use error::{Error, Result};
pub use record::{RestaurantRecord, RestaurantDocument, FeatureTags, NO_WEBSITE};
pub use vocabulary::{FeatureVocabulary, FeatureLabel};
pub use filter::{Filter, FilterCriteria, FilterCondition, CriteriaFilter, ALL};
pub use display::{DisplayUnit, GridState, Link, results_count_label};
pub use coalesce::{CoalescingWindow, Timed, coalesce};
pub use view::{DiningGuide, FeaturedView, FilterEvent, HtmlSurface, Surface, ViewStatus, DEFAULT_FEATURED_COUNT};
