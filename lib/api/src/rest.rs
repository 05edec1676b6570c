use actix_web::{web, App, HttpServer, HttpResponse, Result as ActixResult};
use actix_cors::Cors;
use nsbbites_core::html::{self, FilterOptions, SelectOptions};
use nsbbites_core::{
    Collection, DiningGuide, FeatureVocabulary, FeaturedView, FilterCriteria, GridState,
    HtmlSurface, RestaurantRecord, ViewStatus, DEFAULT_FEATURED_COUNT,
};
use nsbbites_storage::{Fetch, LoadError, Loader};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Site-wide settings for the HTTP front end
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub featured_count: usize,
    /// Served under `/images` when set
    pub images_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "NSB Bites Dining Guide".to_string(),
            featured_count: DEFAULT_FEATURED_COUNT,
            images_dir: None,
        }
    }
}

/// Collections loaded at startup, one per view
pub struct AppState {
    config: SiteConfig,
    vocabulary: FeatureVocabulary,
    dining: Result<Collection, Arc<LoadError>>,
    featured: FeaturedView<HtmlSurface>,
}

impl AppState {
    /// Load the dining guide and the featured grid. Each view fetches the
    /// document on its own.
    pub async fn load<F: Fetch>(loader: &Loader<F>, config: SiteConfig) -> Self {
        let dining = loader.load().await;
        let mut featured = featured_view(&config);
        if featured.needs_load() {
            featured.populate(loader.load().await);
        }
        Self::assemble(config, dining, featured)
    }

    pub fn from_parts(
        config: SiteConfig,
        dining: Result<Collection, LoadError>,
        featured: Result<Collection, LoadError>,
    ) -> Self {
        let mut view = featured_view(&config);
        view.populate(featured);
        Self::assemble(config, dining, view)
    }

    fn assemble(
        config: SiteConfig,
        dining: Result<Collection, LoadError>,
        featured: FeaturedView<HtmlSurface>,
    ) -> Self {
        match &dining {
            Ok(collection) => info!("Dining guide ready with {} restaurants", collection.count()),
            Err(e) => error!("Dining guide unavailable: {}", e),
        }

        Self {
            config,
            vocabulary: FeatureVocabulary::builtin(),
            dining: dining.map_err(Arc::new),
            featured,
        }
    }

    /// A fresh dining-guide view over the startup collection showing `criteria`
    fn guide_for(&self, criteria: FilterCriteria) -> DiningGuide<HtmlSurface> {
        let mut guide = DiningGuide::with_collection(
            Some(HtmlSurface::new()),
            self.vocabulary.clone(),
            Duration::ZERO,
            self.dining.clone(),
        );
        guide.submit(criteria);
        guide
    }

    /// The full dining-guide page for `criteria`
    pub fn guide_page(&self, criteria: FilterCriteria) -> String {
        let guide = self.guide_for(criteria);
        let (state, count) = match guide.surface() {
            Some(surface) => (surface.state().clone(), surface.count().map(str::to_string)),
            None => (GridState::Loading, None),
        };
        html::dining_guide_page(
            &self.config.title,
            guide.criteria(),
            &self.filter_options(),
            count.as_deref(),
            &state,
        )
    }

    /// The featured-restaurants page
    pub fn featured_page(&self) -> String {
        match self.featured.surface() {
            Some(surface) => html::featured_page(&self.config.title, surface.state()),
            None => html::featured_page(&self.config.title, &GridState::Loading),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn filter_options(&self) -> FilterOptions {
        let Ok(collection) = &self.dining else {
            return FilterOptions::default();
        };
        let same = |v: String| (v.clone(), v);
        FilterOptions {
            cuisines: SelectOptions {
                options: collection.cuisines().into_iter().map(same).collect(),
            },
            prices: SelectOptions {
                options: collection.price_tiers().into_iter().map(same).collect(),
            },
            features: SelectOptions {
                options: collection
                    .feature_tags()
                    .into_iter()
                    .map(|tag| {
                        let label = self.vocabulary.label(&tag).to_string();
                        (tag, label)
                    })
                    .collect(),
            },
        }
    }
}

fn featured_view(config: &SiteConfig) -> FeaturedView<HtmlSurface> {
    FeaturedView::new(
        Some(HtmlSurface::without_count()),
        FeatureVocabulary::builtin(),
        config.featured_count,
    )
}

#[derive(Serialize)]
struct RestaurantsResponse<'a> {
    result: Vec<&'a RestaurantRecord>,
    count: usize,
    label: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        state: Arc<AppState>,
        port: u16,
    ) -> std::io::Result<()> {
        let images_dir = state.config.images_dir.clone();

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            let mut app = App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(routes);

            if let Some(dir) = &images_dir {
                app = app.service(actix_files::Files::new("/images", dir));
            }
            app
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dining_guide))
        .route("/featured", web::get().to(featured))
        .route("/features", web::get().to(list_features))
        .route("/restaurants", web::get().to(list_restaurants))
        .route("/restaurants/cards", web::get().to(restaurant_cards));
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn dining_guide(
    state: web::Data<Arc<AppState>>,
    query: web::Query<FilterCriteria>,
) -> ActixResult<HttpResponse> {
    Ok(html_response(state.guide_page(query.into_inner())))
}

async fn restaurant_cards(
    state: web::Data<Arc<AppState>>,
    query: web::Query<FilterCriteria>,
) -> ActixResult<HttpResponse> {
    let guide = state.guide_for(query.into_inner());
    let Some(surface) = guide.surface() else {
        return Ok(HttpResponse::InternalServerError().finish());
    };
    Ok(html_response(surface.grid_html().to_string()))
}

async fn list_restaurants(
    state: web::Data<Arc<AppState>>,
    query: web::Query<FilterCriteria>,
) -> ActixResult<HttpResponse> {
    let guide = state.guide_for(query.into_inner());

    if guide.status() != ViewStatus::Ready {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Unable to load restaurants"
        })));
    }

    let filtered = guide.filtered();
    let response = RestaurantsResponse {
        result: filtered.iter().map(|r| r.as_ref()).collect(),
        count: filtered.len(),
        label: nsbbites_core::results_count_label(filtered.len()),
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn featured(
    state: web::Data<Arc<AppState>>,
) -> ActixResult<HttpResponse> {
    Ok(html_response(state.featured_page()))
}

async fn list_features(
    state: web::Data<Arc<AppState>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.vocabulary.entries()
    })))
}
