// Realty Engine - Web Server
// REST API over the listing filter, mortgage engine and contact desk

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use realty_engine::{
    calculate, filter, ContactDesk, ContactMessage, FilterForm, ListingCard, LoanForm,
    MortgageResult, SimulatedGateway, SubmitOutcome, NO_RESULTS_MESSAGE, SUCCESS_NOTICE,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    catalog: Arc<realty_engine::Catalog>,
    desk: Arc<Mutex<ContactDesk<SimulatedGateway>>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn failed(data: T, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }
}

/// Listing search response
#[derive(Serialize)]
struct ListingsResponse {
    listings: Vec<ListingCard>,
    catalog_size: usize,
    match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Mortgage calculation response: raw figures plus display strings
#[derive(Serialize)]
struct MortgageResponse {
    result: MortgageResult,
    display: MortgageDisplay,
}

#[derive(Serialize)]
struct MortgageDisplay {
    loan_amount: String,
    monthly_principal_interest: String,
    total_monthly_payment: String,
    total_interest: String,
    total_cost: String,
    down_payment_percent: String,
}

impl From<&MortgageResult> for MortgageDisplay {
    fn from(result: &MortgageResult) -> Self {
        Self {
            loan_amount: result.loan_amount_display(),
            monthly_principal_interest: result.monthly_pi_display(),
            total_monthly_payment: result.total_monthly_display(),
            total_interest: result.total_interest_display(),
            total_cost: result.total_cost_display(),
            down_payment_percent: result.down_payment_percent_display(),
        }
    }
}

/// Contact submission response
#[derive(Serialize)]
struct ContactResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    inquiry_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    notice: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/listings?price=&type=&bedrooms=&search= - Filter listings
async fn get_listings(
    State(state): State<AppState>,
    Query(form): Query<FilterForm>,
) -> impl IntoResponse {
    let criteria = form.parse();
    let matched = filter::apply(state.catalog.listings(), &criteria);

    let message = if matched.is_empty() && !criteria.is_unrestricted() {
        Some(NO_RESULTS_MESSAGE.to_string())
    } else {
        None
    };

    let response = ListingsResponse {
        match_count: matched.len(),
        listings: matched.iter().map(|l| l.card()).collect(),
        catalog_size: state.catalog.len(),
        message,
    };

    (StatusCode::OK, Json(ApiResponse::ok(response)))
}

/// POST /api/mortgage - Calculate a payment breakdown
async fn post_mortgage(Json(form): Json<LoanForm>) -> impl IntoResponse {
    let result = calculate(&form.parse());
    let display = MortgageDisplay::from(&result);

    (
        StatusCode::OK,
        Json(ApiResponse::ok(MortgageResponse { result, display })),
    )
}

/// POST /api/contact - Validate and dispatch a contact message
async fn post_contact(
    State(state): State<AppState>,
    Json(msg): Json<ContactMessage>,
) -> impl IntoResponse {
    // The simulated gateway blocks for its fixed delay; keep that off the
    // async runtime
    let desk = state.desk.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut desk = desk.lock().unwrap();
        desk.submit(&msg)
    })
    .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Contact dispatch task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failed(
                    ContactResponse {
                        inquiry_id: None,
                        errors: vec![],
                        notice: realty_engine::FAILURE_NOTICE.to_string(),
                    },
                    "dispatch task failed",
                )),
            );
        }
    };

    match outcome {
        SubmitOutcome::Sent(receipt) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ContactResponse {
                inquiry_id: Some(receipt.inquiry_id),
                errors: vec![],
                notice: SUCCESS_NOTICE.to_string(),
            })),
        ),
        SubmitOutcome::Invalid(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::failed(
                ContactResponse {
                    inquiry_id: None,
                    errors: errors.iter().map(|e| e.message.clone()).collect(),
                    notice: String::new(),
                },
                "validation failed",
            )),
        ),
        SubmitOutcome::Busy => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ApiResponse::failed(
                ContactResponse {
                    inquiry_id: None,
                    errors: vec![],
                    notice: String::new(),
                },
                "a submission is already in progress",
            )),
        ),
        SubmitOutcome::Failed => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::failed(
                ContactResponse {
                    inquiry_id: None,
                    errors: vec![],
                    notice: realty_engine::FAILURE_NOTICE.to_string(),
                },
                "submission failed",
            )),
        ),
    }
}

// ============================================================================
// Main Server
// ============================================================================

fn load_catalog() -> anyhow::Result<realty_engine::Catalog> {
    match std::env::var("LISTINGS_FILE") {
        Ok(path) => {
            let ext = Path::new(&path)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            match ext {
                "csv" => realty_engine::Catalog::from_csv_file(&path),
                _ => realty_engine::Catalog::from_json_file(&path),
            }
        }
        Err(_) => Ok(realty_engine::Catalog::from_sample()),
    }
}

#[tokio::main]
async fn main() {
    println!("Realty Engine - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let catalog = match load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load listings: {:#}", e);
            std::process::exit(1);
        }
    };
    println!("✓ Catalog loaded: {} listings", catalog.len());

    // Create shared state
    let state = AppState {
        catalog: Arc::new(catalog),
        desk: Arc::new(Mutex::new(ContactDesk::new(SimulatedGateway::default()))),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/listings", get(get_listings))
        .route("/mortgage", post(post_mortgage))
        .route("/contact", post(post_contact))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\nServer running on http://localhost:{}", port);
    println!("   API: http://localhost:{}/api/listings", port);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
