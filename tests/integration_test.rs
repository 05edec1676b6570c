// Integration tests for NSB Bites
use nsbbites_core::{
    DiningGuide, FeatureVocabulary, FeaturedView, FilterCriteria, FilterEvent, GridState,
    HtmlSurface, ViewStatus, DEFAULT_FEATURED_COUNT,
};
use nsbbites_storage::{DataSource, FileFetch, Loader};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn sample_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/restaurants.json")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

async fn loaded_guide() -> DiningGuide<HtmlSurface> {
    let loader = Loader::from_source(DataSource::File(sample_data()));
    let mut guide = DiningGuide::new(Some(HtmlSurface::new()), FeatureVocabulary::builtin(), ms(300));
    guide.populate(loader.load().await);
    guide
}

#[tokio::test]
async fn test_sample_data_loads() {
    let guide = loaded_guide().await;
    assert_eq!(guide.status(), ViewStatus::Ready);
    assert_eq!(guide.full().count(), 8);

    let surface = guide.surface().unwrap();
    assert_eq!(surface.count(), Some("Showing 8 restaurants"));
    assert_eq!(surface.grid_html().matches("class=\"restaurant-card\"").count(), 8);
}

#[tokio::test]
async fn test_unknown_feature_tag_displayed_verbatim() {
    let mut guide = loaded_guide().await;
    guide.apply_event(FilterEvent::FeatureSelected("dog-friendly".into()), ms(0));

    let surface = guide.surface().unwrap();
    assert_eq!(surface.count(), Some("Showing 1 restaurant"));
    assert!(surface.grid_html().contains("<span class=\"feature-tag\">dog-friendly</span>"));
    assert!(surface.grid_html().contains("<span class=\"feature-tag\">Live Music</span>"));
}

#[tokio::test]
async fn test_typing_then_selecting() {
    let mut guide = loaded_guide().await;

    for (i, prefix) in ["s", "sh", "shr", "shrimp"].iter().enumerate() {
        guide.apply_event(FilterEvent::SearchInput(prefix.to_string()), ms(i as u64 * 80));
    }
    assert!(!guide.tick(ms(300)));
    assert!(guide.tick(ms(540)));

    let names: Vec<_> = guide.filtered().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Pelican Grill", "Sunrise Cafe"]);

    guide.apply_event(FilterEvent::PriceSelected("$".into()), ms(600));
    let names: Vec<_> = guide.filtered().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Sunrise Cafe"]);
    assert_eq!(guide.surface().unwrap().count(), Some("Showing 1 restaurant"));
}

#[tokio::test]
async fn test_clear_after_no_results() {
    let mut guide = loaded_guide().await;
    let criteria = FilterCriteria::new()
        .with_search("pizza")
        .with_cuisine("Italian")
        .with_price("$$")
        .with_feature("bar");
    guide.submit(criteria.clone());
    let subset: Vec<_> = guide.filtered().to_vec();
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].name, "Nonna's Kitchen");

    guide.apply_event(FilterEvent::CuisineSelected("Sushi".into()), ms(0));
    assert_eq!(guide.surface().unwrap().state(), &GridState::NoResults);
    assert!(guide.surface().unwrap().grid_html().contains("No restaurants found"));

    guide.apply_event(FilterEvent::Clear, ms(10));
    assert_eq!(guide.filtered().len(), 8);
    assert_eq!(guide.surface().unwrap().count(), Some("Showing 8 restaurants"));

    guide.submit(criteria);
    assert_eq!(guide.filtered(), subset.as_slice());
}

#[tokio::test]
async fn test_unreadable_document_shows_unable_to_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"restaurants\": [").unwrap();

    let loader = Loader::new(FileFetch::new(file.path()));
    let mut guide = DiningGuide::new(Some(HtmlSurface::new()), FeatureVocabulary::builtin(), ms(300));
    guide.populate(loader.load().await);

    assert_eq!(guide.status(), ViewStatus::Failed);
    let surface = guide.surface().unwrap();
    assert!(surface.grid_html().contains("Unable to load restaurants"));
    assert!(surface.grid_html().contains("Please try again later."));
    assert_eq!(surface.count(), None);
}

#[tokio::test]
async fn test_featured_view_loads_independently() {
    let loader = Loader::from_source(DataSource::File(sample_data()));

    let guide = loaded_guide().await;
    let mut featured = FeaturedView::new(Some(HtmlSurface::without_count()), FeatureVocabulary::builtin(), DEFAULT_FEATURED_COUNT);
    featured.populate(loader.load().await);

    assert_eq!(featured.shown().len(), 4);
    for (shown, full) in featured.shown().iter().zip(guide.full().records()) {
        assert_eq!(shown.name, full.name);
        assert!(!std::sync::Arc::ptr_eq(shown, full));
    }
}

#[tokio::test]
async fn test_website_links_follow_sentinel() {
    let guide = loaded_guide().await;
    let state = guide.grid_state();

    let cards = state.cards();
    let pelican = cards.iter().find(|c| c.name == "Pelican Grill").unwrap();
    assert_eq!(pelican.website.as_ref().map(|l| l.href.as_str()), Some("https://pelicangrill.example.com"));

    let nonna = cards.iter().find(|c| c.name == "Nonna's Kitchen").unwrap();
    assert!(nonna.website.is_none());
}
