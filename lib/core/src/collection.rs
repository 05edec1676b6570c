use crate::{Filter, FilterCriteria, RestaurantDocument, RestaurantRecord};
use crate::filter;
use std::sync::Arc;

/// The full, ordered list of restaurants loaded for one view.
///
/// Cloning is cheap and shares the records; the list itself is never
/// modified after construction.
#[derive(Debug, Clone)]
pub struct Collection {
    records: Arc<[Arc<RestaurantRecord>]>,
}

impl Collection {
    pub fn new(records: Vec<Arc<RestaurantRecord>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn from_records(records: Vec<RestaurantRecord>) -> Self {
        Self::new(records.into_iter().map(Arc::new).collect())
    }

    pub fn from_document(doc: RestaurantDocument) -> Self {
        Self::new(doc.into_records())
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Arc<RestaurantRecord>] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Arc<RestaurantRecord>> {
        self.records.get(index)
    }

    /// The first `count` records in source order
    pub fn first(&self, count: usize) -> Vec<Arc<RestaurantRecord>> {
        self.records.iter().take(count).cloned().collect()
    }

    /// Records matching `criteria`, in source order
    pub fn apply(&self, criteria: &FilterCriteria) -> Vec<Arc<RestaurantRecord>> {
        filter::apply(&self.records, criteria)
    }

    /// Records accepted by an arbitrary filter, in source order
    pub fn search(&self, filter: &dyn Filter) -> Vec<Arc<RestaurantRecord>> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    /// Distinct cuisine labels in first-seen order, folded the same way the
    /// cuisine filter compares them
    pub fn cuisines(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for record in self.records.iter() {
            let key = record.cuisine.to_lowercase();
            if !keys.contains(&key) {
                keys.push(key);
                seen.push(record.cuisine.clone());
            }
        }
        seen
    }

    /// Distinct price tiers, cheapest first
    pub fn price_tiers(&self) -> Vec<String> {
        let mut tiers: Vec<String> = Vec::new();
        for record in self.records.iter() {
            if !tiers.contains(&record.price_range) {
                tiers.push(record.price_range.clone());
            }
        }
        tiers.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        tiers
    }

    /// Distinct feature tags in first-seen order
    pub fn feature_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.records.iter().flat_map(|r| r.features.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Collection {
        Collection::from_records(vec![
            RestaurantRecord::new("Pelican Grill", "Seafood", "$$").with_features(["waterfront", "bar"]),
            RestaurantRecord::new("Vino Vault", "Wine Bar", "$$$").with_features(["wine-bar"]),
            RestaurantRecord::new("Sunrise Cafe", "Cafe", "$").with_features(["coffee", "bar"]),
            RestaurantRecord::new("Reef Shack", "seafood", "$"),
            RestaurantRecord::new("Tide Table", "Seafood", "$$"),
        ])
    }

    #[test]
    fn test_first_takes_source_order() {
        let c = collection();
        let featured: Vec<_> = c.first(4).iter().map(|r| r.name.clone()).collect();
        assert_eq!(featured, vec!["Pelican Grill", "Vino Vault", "Sunrise Cafe", "Reef Shack"]);
        assert_eq!(c.first(10).len(), 5);
    }

    #[test]
    fn test_apply_shares_records() {
        let c = collection();
        let result = c.apply(&FilterCriteria::new().with_cuisine("seafood"));
        assert_eq!(result.len(), 3);
        assert!(Arc::ptr_eq(&result[0], c.get(0).unwrap()));
        assert!(Arc::ptr_eq(&result[1], c.get(3).unwrap()));
        assert!(Arc::ptr_eq(&result[2], c.get(4).unwrap()));
    }

    #[test]
    fn test_selector_options() {
        let c = collection();
        assert_eq!(c.cuisines(), vec!["Seafood", "Wine Bar", "Cafe"]);
        assert_eq!(c.price_tiers(), vec!["$", "$$", "$$$"]);
        assert_eq!(c.feature_tags(), vec!["waterfront", "bar", "wine-bar", "coffee"]);
    }

    #[test]
    fn test_cuisine_options_fold_unicode_case() {
        let c = Collection::from_records(vec![
            RestaurantRecord::new("Le Petit", "Café", "$"),
            RestaurantRecord::new("Grand", "CAFÉ", "$$"),
        ]);
        let options = c.cuisines();
        assert_eq!(options, vec!["Café"]);
        assert_eq!(c.apply(&FilterCriteria::new().with_cuisine(&options[0])).len(), 2);
    }

    struct CheapEats;

    impl Filter for CheapEats {
        fn matches(&self, record: &RestaurantRecord) -> bool {
            record.price_range == "$"
        }
    }

    #[test]
    fn test_search_with_custom_filter() {
        let c = collection();
        let names: Vec<_> = c.search(&CheapEats).iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Sunrise Cafe", "Reef Shack"]);
    }

    #[test]
    fn test_clone_shares_records() {
        let c = collection();
        let copy = c.clone();
        assert!(Arc::ptr_eq(c.get(2).unwrap(), copy.get(2).unwrap()));
    }
}
