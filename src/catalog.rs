// Listing Catalog
// Property records and the owned listing set they live in

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::mortgage::group_thousands;
use crate::validate::validate_listing;

// ============================================================================
// LISTING RECORD
// ============================================================================

/// A single property listing.
///
/// The property type is an open set ("house", "condo", ...) rather than an
/// enum so externally sourced catalogs can introduce new types without a
/// schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identity, assigned on ingest when the source has none
    #[serde(default = "default_id")]
    pub id: String,

    /// Street address
    pub address: String,

    /// Neighborhood name
    pub neighborhood: String,

    /// Asking price
    pub price: f64,

    /// Bedroom count
    pub bedrooms: u32,

    /// Bathroom count (halves allowed)
    pub bathrooms: f64,

    /// Interior size in square feet
    pub sqft: u32,

    /// Property type ("house", "condo", ...)
    #[serde(rename = "type")]
    pub property_type: String,

    /// Photo URI
    pub image: String,
}

fn default_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Listing {
    /// Display card for this listing: the formatted summary surface
    /// (address, neighborhood, price, features) the UI renders.
    pub fn card(&self) -> ListingCard {
        ListingCard {
            address: self.address.clone(),
            neighborhood: self.neighborhood.clone(),
            price: format!("${}", group_thousands(self.price.round().max(0.0) as u64)),
            features: format!(
                "{} bed · {} bath · {} sq ft",
                self.bedrooms,
                self.bathrooms,
                group_thousands(self.sqft as u64)
            ),
            image: self.image.clone(),
        }
    }
}

/// Formatted summary-card projection of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub address: String,
    pub neighborhood: String,
    pub price: String,
    pub features: String,
    pub image: String,
}

// ============================================================================
// SAMPLE DATA
// ============================================================================

/// The built-in sample records, used when no external catalog is loaded.
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: default_id(),
            address: "123 Maple Street".to_string(),
            neighborhood: "Westmount".to_string(),
            price: 450_000.0,
            bedrooms: 3,
            bathrooms: 2.0,
            sqft: 1200,
            property_type: "house".to_string(),
            image: "https://images.unsplash.com/photo-1568605114967-8130f3a36994?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60".to_string(),
        },
        Listing {
            id: default_id(),
            address: "456 Oak Avenue".to_string(),
            neighborhood: "Riverbend".to_string(),
            price: 320_000.0,
            bedrooms: 2,
            bathrooms: 2.0,
            sqft: 950,
            property_type: "condo".to_string(),
            image: "https://images.unsplash.com/photo-1570129477492-45c003edd2be?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60".to_string(),
        },
        Listing {
            id: default_id(),
            address: "789 Pine Road".to_string(),
            neighborhood: "Glenora".to_string(),
            price: 680_000.0,
            bedrooms: 4,
            bathrooms: 3.0,
            sqft: 1800,
            property_type: "house".to_string(),
            image: "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60".to_string(),
        },
    ]
}

// ============================================================================
// CATALOG
// ============================================================================

/// Owned set of listings.
///
/// Replaces ad-hoc shared mutable lists: the catalog is loaded once,
/// validated at the boundary, and only ever read afterwards. Filtering
/// produces new vectors instead of mutating in place.
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Catalog over the built-in sample records
    pub fn from_sample() -> Self {
        Catalog {
            listings: sample_listings(),
        }
    }

    /// Build from already-parsed records, validating each one.
    pub fn from_listings(listings: Vec<Listing>) -> Result<Self> {
        let mut problems = Vec::new();

        for (i, listing) in listings.iter().enumerate() {
            if let Err(errors) = validate_listing(listing) {
                for e in errors {
                    problems.push(format!("record {}: {}", i + 1, e));
                }
            }
        }

        if !problems.is_empty() {
            bail!("catalog rejected:\n  {}", problems.join("\n  "));
        }

        Ok(Catalog { listings })
    }

    /// Load a catalog from a JSON array of listings.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read listings file: {:?}", path.as_ref()))?;

        let listings: Vec<Listing> =
            serde_json::from_str(&content).context("Failed to parse listings JSON")?;

        Catalog::from_listings(listings)
    }

    /// Load a catalog from a CSV file with a header row matching the
    /// listing fields (address, neighborhood, price, bedrooms, bathrooms,
    /// sqft, type, image).
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())
            .with_context(|| format!("Failed to open listings CSV: {:?}", path.as_ref()))?;

        let mut listings = Vec::new();
        for (i, row) in reader.deserialize().enumerate() {
            let listing: Listing =
                row.with_context(|| format!("Failed to parse CSV record {}", i + 1))?;
            listings.push(listing);
        }

        Catalog::from_listings(listings)
    }

    /// All listings, in catalog order
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
