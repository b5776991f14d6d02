// Field Intake
// Raw form values normalized once at the boundary into typed inputs.
// Downstream code never sees missing or malformed fields.

use serde::{Deserialize, Serialize};

use crate::filter::{BedroomFilter, FilterCriteria, PriceBand, TypeFilter};
use crate::mortgage::LoanParameters;

/// Amortization fallback when the field is absent or unparsable (years)
pub const DEFAULT_AMORTIZATION_YEARS: f64 = 25.0;

/// Parse a currency-ish amount from free text.
///
/// Tolerates surrounding whitespace, a leading "$" and thousands separators:
/// " $450,000 " parses to 450000.0. Returns None for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn amount_or(raw: &Option<String>, fallback: f64) -> f64 {
    raw.as_deref().and_then(parse_amount).unwrap_or(fallback)
}

/// Like `amount_or`, but zero and negative values also take the fallback.
/// Used for amortization, where 0 years would make every payment divide
/// by zero downstream.
fn positive_amount_or(raw: &Option<String>, fallback: f64) -> f64 {
    raw.as_deref()
        .and_then(parse_amount)
        .filter(|v| *v > 0.0)
        .unwrap_or(fallback)
}

// ============================================================================
// LOAN FORM
// ============================================================================

/// Raw mortgage form values, exactly as submitted.
///
/// Any field may be absent or garbage; `parse` substitutes 0 (malformed
/// input still produces a result rather than an error), except amortization
/// which falls back to 25 years when absent, malformed, or not positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanForm {
    pub home_price: Option<String>,
    pub down_payment: Option<String>,
    pub interest_rate: Option<String>,
    pub amortization: Option<String>,
    pub property_tax: Option<String>,
    pub insurance: Option<String>,
}

impl LoanForm {
    /// Normalize into typed loan parameters, applying the defaulting rules.
    pub fn parse(&self) -> LoanParameters {
        LoanParameters {
            home_price: amount_or(&self.home_price, 0.0),
            down_payment: amount_or(&self.down_payment, 0.0),
            annual_interest_rate_pct: amount_or(&self.interest_rate, 0.0),
            amortization_years: positive_amount_or(&self.amortization, DEFAULT_AMORTIZATION_YEARS),
            annual_property_tax: amount_or(&self.property_tax, 0.0),
            annual_insurance: amount_or(&self.insurance, 0.0),
        }
    }
}

// ============================================================================
// FILTER FORM
// ============================================================================

/// Raw listing-filter values. Absent fields mean "no restriction".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterForm {
    /// "all", "min-max" or "min-" price range
    pub price: Option<String>,

    /// "all" or a property type ("house", "condo", ...)
    #[serde(rename = "type")]
    pub property_type: Option<String>,

    /// "all" or an exact bedroom count
    pub bedrooms: Option<String>,

    /// Free-text search over address and neighborhood
    pub search: Option<String>,
}

impl FilterForm {
    /// Normalize into typed filter criteria.
    pub fn parse(&self) -> FilterCriteria {
        FilterCriteria {
            price: PriceBand::parse(self.price.as_deref().unwrap_or("all")),
            property_type: TypeFilter::parse(self.property_type.as_deref().unwrap_or("all")),
            bedrooms: BedroomFilter::parse(self.bedrooms.as_deref().unwrap_or("all")),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
