//! # NSB Bites
//!
//! The New Smyrna Beach dining guide: a static list of restaurants rendered
//! as HTML cards, with search and filters over the in-memory list.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install nsbbites
//! nsbbites serve --data data/restaurants.json --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use nsbbites::prelude::*;
//!
//! # async fn run() {
//! let loader = Loader::from_source(DataSource::File("data/restaurants.json".into()));
//!
//! let mut guide = DiningGuide::new(
//!     Some(HtmlSurface::new()),
//!     FeatureVocabulary::builtin(),
//!     std::time::Duration::from_millis(300),
//! );
//! guide.populate(loader.load().await);
//!
//! guide.apply_event(FilterEvent::CuisineSelected("Seafood".into()), std::time::Duration::ZERO);
//! println!("{:?}", guide.surface().and_then(|s| s.count()));
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`nsbbites-core`](https://docs.rs/nsbbites-core) - Records, criteria, filtering, cards, views
//! - [`nsbbites-storage`](https://docs.rs/nsbbites-storage) - Loading the JSON document from a file or URL
//! - [`nsbbites-api`](https://docs.rs/nsbbites-api) - HTTP pages and JSON endpoints

// Re-export core types
pub use nsbbites_core::{
    Collection, RestaurantRecord, RestaurantDocument, FeatureVocabulary,
    Filter, FilterCriteria, FilterCondition,
    DisplayUnit, GridState, results_count_label,
    CoalescingWindow, Timed, coalesce,
    DiningGuide, FeaturedView, FilterEvent, HtmlSurface, Surface, ViewStatus,
    Error, Result,
};

// Re-export storage
pub use nsbbites_storage::{DataSource, Loader, LoadError};

// Re-export API
pub use nsbbites_api::{AppState, RestApi, SiteConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Collection, RestaurantRecord, FeatureVocabulary,
        Filter, FilterCriteria,
        DisplayUnit, GridState, results_count_label,
        DiningGuide, FeaturedView, FilterEvent, HtmlSurface, Surface,
        DataSource, Loader, LoadError,
        AppState, RestApi, SiteConfig,
    };
}

/// HTML markup helpers
pub mod html {
    pub use nsbbites_core::html::{card, grid, dining_guide_page, featured_page, escape_html};
}
