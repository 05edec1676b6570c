//! HTML markup for cards, grids and whole pages.
//!
//! Every string taken from a record is escaped before interpolation.

use crate::display::{DisplayUnit, GridState};
use crate::filter::{FilterCriteria, ALL};

const PIN_ICON: &str = r#"<svg viewBox="0 0 24 24"><path d="M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z"/></svg>"#;

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Markup for a single restaurant card
pub fn card(unit: &DisplayUnit) -> String {
    let mut html = String::with_capacity(1024);

    let image_style = unit
        .image_layers
        .iter()
        .map(|url| format!("url('{}')", url))
        .collect::<Vec<_>>()
        .join(", ");

    html.push_str(&format!(
        "<div class=\"restaurant-card\" data-cuisine=\"{}\" data-price=\"{}\">\n",
        escape_html(&unit.cuisine_key),
        escape_html(&unit.price)
    ));
    html.push_str(&format!(
        "<div class=\"restaurant-card-image\" style=\"background-image: {}\">\n",
        escape_html(&image_style)
    ));
    html.push_str(&format!(
        "<span class=\"price-tag\">{}</span>\n</div>\n",
        escape_html(&unit.price)
    ));

    html.push_str("<div class=\"restaurant-card-content\">\n");
    html.push_str(&format!("<h3>{}</h3>\n", escape_html(&unit.name)));
    html.push_str(&format!(
        "<p class=\"restaurant-cuisine\">{}</p>\n",
        escape_html(&unit.cuisine)
    ));
    html.push_str(&format!("<p>{}</p>\n", escape_html(&unit.description)));
    html.push_str(&format!(
        "<div class=\"restaurant-address\">\n{}\n<span>{}</span>\n</div>\n",
        PIN_ICON,
        escape_html(&unit.address)
    ));

    html.push_str("<div class=\"restaurant-features\">\n");
    for label in &unit.feature_labels {
        html.push_str(&format!(
            "<span class=\"feature-tag\">{}</span>",
            escape_html(label)
        ));
    }
    html.push_str("\n</div>\n");

    html.push_str("<div class=\"restaurant-links\">\n");
    for link in unit.links() {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
            escape_html(&link.href),
            link.label
        ));
    }
    html.push_str("</div>\n</div>\n</div>\n");

    html
}

/// Inner markup of the grid container for a given state
pub fn grid(state: &GridState) -> String {
    match state {
        GridState::Cards(cards) => cards.iter().map(card).collect(),
        other => match other.message() {
            Some((heading, hint)) => format!(
                "<div class=\"no-results\">\n<h3>{}</h3>\n<p>{}</p>\n</div>\n",
                heading, hint
            ),
            None => String::new(),
        },
    }
}

/// Selector options for one filter dropdown
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// `(value, label)` pairs, shown after the "all" entry
    pub options: Vec<(String, String)>,
}

/// Options for the three filter dropdowns of the dining-guide page
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub cuisines: SelectOptions,
    pub prices: SelectOptions,
    pub features: SelectOptions,
}

fn select(id: &str, name: &str, all_label: &str, options: &SelectOptions, selected: &str) -> String {
    let mut html = format!("<select id=\"{}\" name=\"{}\">\n", id, name);
    html.push_str(&format!(
        "<option value=\"{}\"{}>{}</option>\n",
        ALL,
        if selected == ALL || selected.is_empty() { " selected" } else { "" },
        all_label
    ));
    for (value, label) in &options.options {
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(value),
            if value == selected { " selected" } else { "" },
            escape_html(label)
        ));
    }
    html.push_str("</select>\n");
    html
}

/// The dining-guide page: filter form, result count and grid
pub fn dining_guide_page(
    title: &str,
    criteria: &FilterCriteria,
    options: &FilterOptions,
    count_label: Option<&str>,
    state: &GridState,
) -> String {
    let mut html = String::with_capacity(16 * 1024);
    page_head(&mut html, title);

    html.push_str("<form class=\"filters\" method=\"get\" action=\"/\">\n");
    html.push_str(&format!(
        "<input id=\"search-input\" name=\"search\" type=\"search\" placeholder=\"Search restaurants...\" value=\"{}\">\n",
        escape_html(&criteria.search_term)
    ));
    html.push_str(&select("cuisine-filter", "cuisine", "All Cuisines", &options.cuisines, &criteria.cuisine));
    html.push_str(&select("price-filter", "price", "All Prices", &options.prices, &criteria.price_tier));
    html.push_str(&select("feature-filter", "feature", "All Features", &options.features, &criteria.feature_tag));
    html.push_str("<button type=\"submit\">Filter</button>\n");
    html.push_str("<a id=\"clear-filters\" href=\"/\">Clear Filters</a>\n");
    html.push_str("</form>\n");

    if let Some(label) = count_label {
        html.push_str(&format!("<p id=\"results-count\">{}</p>\n", escape_html(label)));
    }

    html.push_str("<div id=\"restaurant-grid\" class=\"restaurant-grid\">\n");
    html.push_str(&grid(state));
    html.push_str("</div>\n");

    page_tail(&mut html);
    html
}

/// The homepage's featured-restaurants grid
pub fn featured_page(title: &str, state: &GridState) -> String {
    let mut html = String::with_capacity(8 * 1024);
    page_head(&mut html, title);
    html.push_str("<div id=\"featured-restaurants-grid\" class=\"restaurant-grid\">\n");
    if let GridState::Cards(_) = state {
        html.push_str(&grid(state));
    }
    html.push_str("</div>\n");
    page_tail(&mut html);
    html
}

fn page_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
}

fn page_tail(html: &mut String) {
    html.push_str("</body>\n</html>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureVocabulary, RestaurantRecord};

    fn unit(website: &str) -> DisplayUnit {
        let record = RestaurantRecord::new("Bob's <Bait> & Grill", "Seafood", "$")
            .with_features(["bar", "hammocks"])
            .with_map_link("https://maps.example/bob")
            .with_website(website);
        DisplayUnit::from_record(&record, &FeatureVocabulary::builtin())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_card_escapes_record_text() {
        let html = card(&unit("#"));
        assert!(html.contains("<h3>Bob&#39;s &lt;Bait&gt; &amp; Grill</h3>"));
        assert!(!html.contains("<Bait>"));
    }

    #[test]
    fn test_card_feature_labels_and_links() {
        let html = card(&unit("#"));
        assert!(html.contains("<span class=\"feature-tag\">Full Bar</span>"));
        assert!(html.contains("<span class=\"feature-tag\">hammocks</span>"));
        assert!(html.contains(">Directions</a>"));
        assert!(!html.contains(">Website</a>"));

        let html = card(&unit("https://bob.example"));
        assert_eq!(html.matches(">Website</a>").count(), 1);
        assert!(html.contains("href=\"https://bob.example\""));
    }

    #[test]
    fn test_grid_message_states() {
        assert!(grid(&GridState::NoResults).contains("No restaurants found"));
        assert!(grid(&GridState::LoadFailed).contains("Unable to load restaurants"));
        assert!(grid(&GridState::LoadFailed).contains("Please try again later."));
        assert!(!grid(&GridState::Loading).contains("No restaurants found"));
    }

    #[test]
    fn test_dining_guide_page_keeps_selection() {
        let criteria = FilterCriteria::new().with_search("taco").with_price("$$");
        let options = FilterOptions {
            prices: SelectOptions {
                options: vec![("$".into(), "$".into()), ("$$".into(), "$$".into())],
            },
            ..Default::default()
        };
        let html = dining_guide_page("Dining Guide", &criteria, &options, Some("Showing 0 restaurants"), &GridState::NoResults);

        assert!(html.contains("value=\"taco\""));
        assert!(html.contains("<option value=\"$$\" selected>$$</option>"));
        assert!(html.contains("<p id=\"results-count\">Showing 0 restaurants</p>"));
        assert!(html.contains("No restaurants found"));
    }
}
