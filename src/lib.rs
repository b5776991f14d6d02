// Realty Engine - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod catalog;
pub mod contact;
pub mod filter;
pub mod mortgage;
pub mod parser;
pub mod validate;

// Terminal UI (optional - CLI mode)
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use catalog::{sample_listings, Catalog, Listing, ListingCard};
pub use contact::{
    ContactDesk, ContactGateway, ContactMessage, Receipt, SimulatedGateway, SubmitOutcome,
    FAILURE_NOTICE, SUCCESS_NOTICE,
};
pub use filter::{
    apply, matches, BedroomFilter, FilterCriteria, FilterOutcome, ListingView, PriceBand,
    TypeFilter, NO_RESULTS_MESSAGE,
};
pub use mortgage::{calculate, format_currency, format_percent, LoanParameters, MortgageResult};
pub use parser::{parse_amount, FilterForm, LoanForm, DEFAULT_AMORTIZATION_YEARS};
pub use validate::{
    is_valid_email, is_valid_phone, validate_contact, validate_listing, ValidationError,
    ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
