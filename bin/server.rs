// Realty Insight - Web Server
// REST API with Axum over a shared MarketEngine

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use realty_insight::{
    AppConfig, BuyerInsight, LocationEntry, MarketEngine, MarketSentiment, PropertyType,
    RealEstateRecord, SellerInsight,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
struct AppState {
    engine: Arc<MarketEngine>,
    default_property_type: PropertyType,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `?property_type=villa`
#[derive(Deserialize)]
struct PropertyTypeQuery {
    property_type: Option<String>,
}

/// Buyer + seller view of one location
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuidanceResponse {
    location: String,
    property_type: PropertyType,
    current_price: f64,
    sentiment: MarketSentiment,
    buyer: BuyerInsight,
    seller: SellerInsight,
}

#[derive(Serialize)]
struct LocationResponse {
    city: String,
    area: String,
    label: String,
}

impl From<&LocationEntry> for LocationResponse {
    fn from(entry: &LocationEntry) -> Self {
        Self {
            city: entry.city.clone(),
            area: entry.area.clone(),
            label: entry.label.clone(),
        }
    }
}

/// Parse the property type, or a 400 response.
///
/// `location` comes from `Path`, which has already percent-decoded it once.
fn parse_request(
    state: &AppState,
    location: String,
    query: PropertyTypeQuery,
) -> Result<(String, PropertyType), Response> {
    let property_type = match query.property_type {
        Some(raw) => raw.parse::<PropertyType>().map_err(|e| {
            warn!("Rejected request for {}: {}", location, e);
            (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::err(e.to_string()))).into_response()
        })?,
        None => state.default_property_type,
    };

    Ok((location, property_type))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/locations - Every catalog entry
async fn get_locations(State(state): State<AppState>) -> impl IntoResponse {
    let locations: Vec<LocationResponse> = state
        .engine
        .catalog()
        .all_locations()
        .iter()
        .map(LocationResponse::from)
        .collect();

    Json(ApiResponse::ok(locations))
}

/// GET /api/locations/popular - Suggested queries
async fn get_popular_locations(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.engine.catalog().popular_locations()))
}

/// GET /api/analysis/:location - Full record for a query
async fn get_analysis(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Query(query): Query<PropertyTypeQuery>,
) -> Response {
    let (location, property_type) = match parse_request(&state, location, query) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let record: RealEstateRecord = state.engine.generate(&location, property_type).as_ref().clone();
    (StatusCode::OK, Json(ApiResponse::ok(record))).into_response()
}

/// GET /api/guidance/:location - Buyer and seller verdicts
async fn get_guidance(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Query(query): Query<PropertyTypeQuery>,
) -> Response {
    let (location, property_type) = match parse_request(&state, location, query) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    let record = state.engine.generate(&location, property_type);
    let guidance = GuidanceResponse {
        location: record.location.clone(),
        property_type,
        current_price: record.current_price,
        sentiment: MarketSentiment::from_yoy(record.yoy_growth),
        buyer: state.engine.buyer_insight(&record),
        seller: state.engine.seller_insight(&record),
    };

    (StatusCode::OK, Json(ApiResponse::ok(guidance))).into_response()
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/locations", get(get_locations))
        .route("/locations/popular", get(get_popular_locations))
        .route("/analysis/:location", get(get_analysis))
        .route("/guidance/:location", get(get_guidance))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("🌐 Realty Insight - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let engine = MarketEngine::from_config(&config);
    info!(
        "Catalog loaded: {} locations, reference year {}",
        engine.catalog().len(),
        engine.current_year()
    );

    let state = AppState {
        engine: Arc::new(engine),
        default_property_type: config.default_property_type,
    };
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/analysis/Bandra%20West", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
