// Property Filter
// Typed criteria and the stable predicate that selects matching listings

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Listing};

/// Shown when a filter pass matches nothing. This is a valid outcome,
/// not an error.
pub const NO_RESULTS_MESSAGE: &str = "No properties found matching your criteria.";

// ============================================================================
// CRITERIA
// ============================================================================

/// Price restriction parsed from a textual range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PriceBand {
    /// No restriction ("all")
    Any,
    /// Open-ended range "min-"
    AtLeast(f64),
    /// Inclusive range "min-max"
    Between(f64, f64),
}

impl PriceBand {
    /// Parse "all", "min-max" or "min-". Unparsable input degrades to Any.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" {
            return PriceBand::Any;
        }

        let mut parts = raw.splitn(2, '-');
        let min = parts.next().and_then(|s| s.trim().parse::<f64>().ok());
        let max = parts.next().and_then(|s| s.trim().parse::<f64>().ok());

        match (min, max) {
            (Some(min), Some(max)) => PriceBand::Between(min, max),
            (Some(min), None) => PriceBand::AtLeast(min),
            _ => PriceBand::Any,
        }
    }

    fn admits(&self, price: f64) -> bool {
        match *self {
            PriceBand::Any => true,
            PriceBand::AtLeast(min) => price >= min,
            PriceBand::Between(min, max) => price >= min && price <= max,
        }
    }
}

/// Property-type restriction: exact match or none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeFilter {
    Any,
    Only(String),
}

impl TypeFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" {
            TypeFilter::Any
        } else {
            TypeFilter::Only(raw.to_string())
        }
    }

    fn admits(&self, property_type: &str) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(wanted) => wanted == property_type,
        }
    }
}

/// Bedroom restriction. The textual criterion ("3") is parsed once here so
/// matching against the numeric record field is strict afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedroomFilter {
    Any,
    Exactly(u32),
}

impl BedroomFilter {
    /// Parse "all" or an exact count. Non-numeric input degrades to Any.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(n) => BedroomFilter::Exactly(n),
            Err(_) => BedroomFilter::Any,
        }
    }

    fn admits(&self, bedrooms: u32) -> bool {
        match *self {
            BedroomFilter::Any => true,
            BedroomFilter::Exactly(n) => bedrooms == n,
        }
    }
}

/// Full filter criteria. `Default` matches every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub price: PriceBand,
    pub property_type: TypeFilter,
    pub bedrooms: BedroomFilter,
    /// Case-insensitive substring over address or neighborhood;
    /// empty means no restriction
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            price: PriceBand::Any,
            property_type: TypeFilter::Any,
            bedrooms: BedroomFilter::Any,
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    /// True when no criterion restricts anything
    pub fn is_unrestricted(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// Whether a single listing passes all four criteria.
pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    if !criteria.price.admits(listing.price) {
        return false;
    }

    if !criteria.property_type.admits(&listing.property_type) {
        return false;
    }

    if !criteria.bedrooms.admits(listing.bedrooms) {
        return false;
    }

    if !criteria.search.is_empty() {
        let term = criteria.search.to_lowercase();
        let in_address = listing.address.to_lowercase().contains(&term);
        let in_neighborhood = listing.neighborhood.to_lowercase().contains(&term);
        if !in_address && !in_neighborhood {
            return false;
        }
    }

    true
}

/// Select the listings matching the criteria, preserving input order.
/// Returns a new list; the input is never mutated.
pub fn apply(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches(l, criteria))
        .cloned()
        .collect()
}

// ============================================================================
// LISTING VIEW
// ============================================================================

/// Outcome of the most recent filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No filters applied yet - the full catalog is showing
    Unfiltered,
    /// Filters applied, this many listings match
    Matches(usize),
    /// Filters applied, nothing matches (valid empty state)
    NoMatches,
}

/// Render state over a catalog: which listings are currently visible and
/// whether an empty result came from filtering or from never filtering.
#[derive(Debug, Clone)]
pub struct ListingView {
    catalog: Catalog,
    filtered: Option<Vec<Listing>>,
    criteria: FilterCriteria,
}

impl ListingView {
    pub fn new(catalog: Catalog) -> Self {
        ListingView {
            catalog,
            filtered: None,
            criteria: FilterCriteria::default(),
        }
    }

    /// Run a filter pass and remember the result.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) {
        self.filtered = Some(apply(self.catalog.listings(), &criteria));
        self.criteria = criteria;
    }

    /// Drop the active filters, returning to the full catalog.
    pub fn clear_filters(&mut self) {
        self.filtered = None;
        self.criteria = FilterCriteria::default();
    }

    /// Listings to render right now
    pub fn visible(&self) -> &[Listing] {
        match &self.filtered {
            Some(filtered) => filtered,
            None => self.catalog.listings(),
        }
    }

    pub fn outcome(&self) -> FilterOutcome {
        match &self.filtered {
            None => FilterOutcome::Unfiltered,
            Some(filtered) if filtered.is_empty() => FilterOutcome::NoMatches,
            Some(filtered) => FilterOutcome::Matches(filtered.len()),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_listings;

    #[test]
    fn test_price_band_parse() {
        assert_eq!(PriceBand::parse("all"), PriceBand::Any);
        assert_eq!(
            PriceBand::parse("300000-500000"),
            PriceBand::Between(300000.0, 500000.0)
        );
        assert_eq!(PriceBand::parse("800000-"), PriceBand::AtLeast(800000.0));
        assert_eq!(PriceBand::parse("garbage"), PriceBand::Any);
        assert_eq!(PriceBand::parse(""), PriceBand::Any);
    }

    #[test]
    fn test_price_band_boundaries_inclusive() {
        let band = PriceBand::Between(300000.0, 500000.0);
        assert!(band.admits(300000.0));
        assert!(band.admits(500000.0));
        assert!(!band.admits(500000.01));
    }

    #[test]
    fn test_price_filter_on_sample() {
        let criteria = FilterCriteria {
            price: PriceBand::parse("300000-500000"),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);

        let prices: Vec<f64> = result.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![450_000.0, 320_000.0]);
    }

    #[test]
    fn test_open_ended_price_filter() {
        let criteria = FilterCriteria {
            price: PriceBand::parse("500000-"),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, "789 Pine Road");
    }

    #[test]
    fn test_type_filter() {
        let criteria = FilterCriteria {
            property_type: TypeFilter::parse("condo"),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, "456 Oak Avenue");
    }

    #[test]
    fn test_search_matches_neighborhood() {
        let criteria = FilterCriteria {
            search: "glenora".to_string(),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, "789 Pine Road");
    }

    #[test]
    fn test_search_matches_address_case_insensitive() {
        let criteria = FilterCriteria {
            search: "MAPLE".to_string(),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, "123 Maple Street");
    }

    #[test]
    fn test_bedrooms_no_match_is_empty_not_error() {
        let criteria = FilterCriteria {
            bedrooms: BedroomFilter::parse("5"),
            ..Default::default()
        };

        let result = apply(&sample_listings(), &criteria);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        // Match-all criteria must return the catalog in its original order
        let listings = sample_listings();
        let result = apply(&listings, &FilterCriteria::default());
        assert_eq!(result, listings);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let criteria = FilterCriteria {
            price: PriceBand::parse("300000-500000"),
            search: "street".to_string(),
            ..Default::default()
        };

        let once = apply(&sample_listings(), &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_conjunction_of_criteria() {
        let criteria = FilterCriteria {
            price: PriceBand::parse("300000-700000"),
            property_type: TypeFilter::parse("house"),
            bedrooms: BedroomFilter::parse("4"),
            search: String::new(),
        };

        let result = apply(&sample_listings(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, "789 Pine Road");
    }

    #[test]
    fn test_view_distinguishes_unfiltered_from_no_matches() {
        let mut view = ListingView::new(Catalog::from_sample());

        assert_eq!(view.outcome(), FilterOutcome::Unfiltered);
        assert_eq!(view.visible().len(), 3);

        view.apply_filters(FilterCriteria {
            bedrooms: BedroomFilter::Exactly(5),
            ..Default::default()
        });

        assert_eq!(view.outcome(), FilterOutcome::NoMatches);
        assert!(view.visible().is_empty());

        view.clear_filters();
        assert_eq!(view.outcome(), FilterOutcome::Unfiltered);
        assert_eq!(view.visible().len(), 3);
    }
}
