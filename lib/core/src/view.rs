//! View controllers
//!
//! A view owns its own copy of the collection, the current criteria and the
//! surface it draws on. There is no shared state between views: the dining
//! guide and the featured grid each load their collection independently.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use crate::coalesce::CoalescingWindow;
use crate::display::{results_count_label, GridState};
use crate::filter::ALL;
use crate::html;
use crate::{Collection, FeatureVocabulary, FilterCriteria, RestaurantRecord};

/// Number of restaurants on the featured grid
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// Where a view commits its output
pub trait Surface {
    fn show_grid(&mut self, state: &GridState);

    /// Surfaces without a results-count element ignore this
    fn show_count(&mut self, _label: &str) {}
}

/// User interaction with the dining-guide filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The search field changed; coalesced before it takes effect
    SearchInput(String),
    CuisineSelected(String),
    PriceSelected(String),
    FeatureSelected(String),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Ready,
    Failed,
}

/// The filterable restaurant listing
pub struct DiningGuide<S> {
    full: Collection,
    filtered: Vec<Arc<RestaurantRecord>>,
    criteria: FilterCriteria,
    search_input: CoalescingWindow<()>,
    vocabulary: FeatureVocabulary,
    surface: Option<S>,
    status: ViewStatus,
}

impl<S: Surface> DiningGuide<S> {
    /// A view drawing on `surface`; `None` means the page has no grid and
    /// the view stays inert.
    pub fn new(surface: Option<S>, vocabulary: FeatureVocabulary, debounce: Duration) -> Self {
        Self {
            full: Collection::default(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            search_input: CoalescingWindow::new(debounce),
            vocabulary,
            surface,
            status: ViewStatus::Loading,
        }
    }

    /// A view over an outcome that was loaded and logged elsewhere. Installs
    /// it like [`Self::populate`] without logging the load again.
    pub fn with_collection<E>(
        surface: Option<S>,
        vocabulary: FeatureVocabulary,
        debounce: Duration,
        loaded: std::result::Result<Collection, E>,
    ) -> Self {
        let mut guide = Self::new(surface, vocabulary, debounce);
        if guide.surface.is_some() {
            guide.install(loaded.ok());
        }
        guide
    }

    /// Whether the view wants its collection loaded
    pub fn needs_load(&self) -> bool {
        self.surface.is_some() && self.status == ViewStatus::Loading
    }

    /// Install the outcome of a load. A failure replaces the grid with the
    /// unable-to-load message and is not returned to the caller.
    pub fn populate<E: Display>(&mut self, loaded: std::result::Result<Collection, E>) {
        if self.surface.is_none() {
            debug!("No restaurant grid on this page, skipping load");
            return;
        }
        if self.status != ViewStatus::Loading {
            warn!("Dining guide already initialized, ignoring second load");
            return;
        }

        match &loaded {
            Ok(collection) => info!("Loaded {} restaurants", collection.count()),
            Err(e) => error!("Error loading restaurant data: {}", e),
        }
        self.install(loaded.ok());
    }

    fn install(&mut self, loaded: Option<Collection>) {
        match loaded {
            Some(collection) => {
                self.full = collection;
                self.status = ViewStatus::Ready;
                self.refilter();
            }
            None => {
                self.status = ViewStatus::Failed;
                if let Some(surface) = self.surface.as_mut() {
                    surface.show_grid(&GridState::LoadFailed);
                }
            }
        }
    }

    /// Apply a user event. Selector changes and clear take effect at once;
    /// search input waits for the coalescing window (see [`Self::tick`]).
    pub fn apply_event(&mut self, event: FilterEvent, now: Duration) {
        match event {
            FilterEvent::SearchInput(text) => {
                self.criteria.search_term = text;
                self.search_input.push(now, ());
            }
            FilterEvent::CuisineSelected(value) => {
                self.criteria.cuisine = selector_value(value);
                self.refilter();
            }
            FilterEvent::PriceSelected(value) => {
                self.criteria.price_tier = selector_value(value);
                self.refilter();
            }
            FilterEvent::FeatureSelected(value) => {
                self.criteria.feature_tag = selector_value(value);
                self.refilter();
            }
            FilterEvent::Clear => self.clear(),
        }
    }

    /// Run the pending search once its window has passed. Returns whether a
    /// recomputation happened.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.search_input.poll(now).is_some() {
            self.refilter();
            true
        } else {
            false
        }
    }

    /// When the pending search input fires, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.search_input.deadline()
    }

    /// Replace all criteria at once, as a submitted filter form does. Any
    /// pending search input is superseded.
    pub fn submit(&mut self, criteria: FilterCriteria) {
        self.search_input.cancel();
        self.criteria = criteria;
        self.refilter();
    }

    /// Reset every criterion and show the full collection
    pub fn clear(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Recompute the filtered list from the full collection and redraw
    pub fn refilter(&mut self) {
        if self.status != ViewStatus::Ready {
            return;
        }
        self.filtered = self.full.apply(&self.criteria);
        debug!(
            "Filtered {} of {} restaurants with {:?}",
            self.filtered.len(),
            self.full.count(),
            self.criteria
        );
        self.commit();
    }

    fn commit(&mut self) {
        let state = self.grid_state();
        let label = results_count_label(self.filtered.len());
        if let Some(surface) = self.surface.as_mut() {
            surface.show_grid(&state);
            surface.show_count(&label);
        }
    }

    pub fn grid_state(&self) -> GridState {
        match self.status {
            ViewStatus::Loading => GridState::Loading,
            ViewStatus::Failed => GridState::LoadFailed,
            ViewStatus::Ready => {
                GridState::from_records(self.filtered.iter().map(|r| r.as_ref()), &self.vocabulary)
            }
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn full(&self) -> &Collection {
        &self.full
    }

    pub fn filtered(&self) -> &[Arc<RestaurantRecord>] {
        &self.filtered
    }

    pub fn vocabulary(&self) -> &FeatureVocabulary {
        &self.vocabulary
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

fn selector_value(value: String) -> String {
    if value.is_empty() {
        ALL.to_string()
    } else {
        value
    }
}

/// The homepage grid: the first few restaurants, no filters, no count
pub struct FeaturedView<S> {
    count: usize,
    vocabulary: FeatureVocabulary,
    surface: Option<S>,
    shown: Vec<Arc<RestaurantRecord>>,
}

impl<S: Surface> FeaturedView<S> {
    pub fn new(surface: Option<S>, vocabulary: FeatureVocabulary, count: usize) -> Self {
        Self {
            count,
            vocabulary,
            surface,
            shown: Vec::new(),
        }
    }

    pub fn needs_load(&self) -> bool {
        self.surface.is_some() && self.shown.is_empty()
    }

    /// Show the first records of a successful load. A failure is logged and
    /// leaves the surface as it was.
    pub fn populate<E: Display>(&mut self, loaded: std::result::Result<Collection, E>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match loaded {
            Ok(collection) => {
                self.shown = collection.first(self.count);
                if self.shown.is_empty() {
                    return;
                }
                let state = GridState::from_records(self.shown.iter().map(|r| r.as_ref()), &self.vocabulary);
                surface.show_grid(&state);
            }
            Err(e) => {
                error!("Error loading featured restaurants: {}", e);
            }
        }
    }

    pub fn shown(&self) -> &[Arc<RestaurantRecord>] {
        &self.shown
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

/// A surface that keeps the grid as an HTML string
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    state: GridState,
    grid_html: String,
    count: Option<String>,
    has_count: bool,
}

impl HtmlSurface {
    /// A grid with a results-count line
    pub fn new() -> Self {
        Self {
            state: GridState::Loading,
            grid_html: html::grid(&GridState::Loading),
            count: None,
            has_count: true,
        }
    }

    /// A grid without a results-count line
    pub fn without_count() -> Self {
        Self {
            has_count: false,
            ..Self::new()
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn grid_html(&self) -> &str {
        &self.grid_html
    }

    pub fn count(&self) -> Option<&str> {
        self.count.as_deref()
    }
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for HtmlSurface {
    fn show_grid(&mut self, state: &GridState) {
        self.state = state.clone();
        self.grid_html = html::grid(state);
    }

    fn show_count(&mut self, label: &str) {
        if self.has_count {
            self.count = Some(label.to_string());
        }
    }
}
