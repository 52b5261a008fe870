// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use az_tpt_domain::{DomainError, effective_date_from_filename, parse_effective_date};
use az_tpt_ingest::{
    IngestError, IngestOptions, IngestSummary, RunReport, ingest_historical, ingest_rows,
    parse_historical, parse_monthly,
};
use az_tpt_persistence::{
    CountyCoverage, Persistence, PersistenceError, RateListing, VersionCoverage,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

/// AZ TPT Server - HTTP server for the Arizona TPT rate pipeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for jurisdictions, versions, and rates.
    persistence: Arc<Mutex<Persistence>>,
}

/// API request for uploading a monthly rate table.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MonthlyUploadRequest {
    /// The raw CSV content.
    csv: String,
    /// The effective date (e.g., `2026-01-01`). Takes precedence over the filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    effective_date: Option<String>,
    /// The original filename, used to derive the effective date when no
    /// explicit date is given (e.g., `TPT_RATETABLE_ALL_01012026.csv`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    /// Create jurisdictions for unseen region codes. Defaults to true;
    /// disable to skip and report unknown codes instead.
    #[serde(default)]
    create_missing_jurisdictions: Option<bool>,
}

/// API request for uploading a historical rate table.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct HistoricalUploadRequest {
    /// The raw CSV content, carrying a `RateStartDate` column.
    csv: String,
    /// Cutoff for the future-date filter (e.g., `2026-01-01`). Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    as_of: Option<String>,
}

/// API response for a monthly upload.
#[derive(Debug, Clone, Serialize)]
struct MonthlyUploadResponse {
    /// Success indicator.
    success: bool,
    /// The ingestion run report.
    report: RunReport,
}

/// API response for a historical upload.
#[derive(Debug, Clone, Serialize)]
struct HistoricalUploadResponse {
    /// Success indicator.
    success: bool,
    /// The per-date ingestion summary.
    summary: IngestSummary,
}

/// API response for listing rate versions.
#[derive(Debug, Clone, Serialize)]
struct ListVersionsResponse {
    /// Every rate version with its coverage counts, oldest first.
    versions: Vec<VersionCoverage>,
}

/// Query parameters for listing rates.
#[derive(Debug, Deserialize)]
struct ListRatesQuery {
    /// The rate version to read.
    rate_version_id: i64,
    /// Optional region code filter.
    region_code: Option<String>,
    /// Optional business code filter.
    business_code: Option<String>,
    /// Optional minimum total rate filter.
    min_total_rate: Option<f64>,
}

/// API response for listing rates.
#[derive(Debug, Clone, Serialize)]
struct ListRatesResponse {
    /// The rate version that was read.
    rate_version_id: i64,
    /// The matching rates, ordered by region code then business code.
    rates: Vec<RateListing>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::VersionNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            _ => {
                error!(error = %err, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Persistence error: {err}"),
                }
            }
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<IngestError> for HttpError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Store(persistence_error) => persistence_error.into(),
            IngestError::MissingHeaders(_) | IngestError::Csv(_) | IngestError::Date(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            IngestError::Io(_) => {
                error!(error = %err, "I/O error during ingestion");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Resolves the effective date for a monthly upload: an explicit date
/// wins, otherwise the filename's `MMDDYYYY` run is used.
fn resolve_effective_date(req: &MonthlyUploadRequest) -> Result<Date, HttpError> {
    match (&req.effective_date, &req.filename) {
        (Some(text), _) => Ok(parse_effective_date(text)?),
        (None, Some(filename)) => Ok(effective_date_from_filename(filename)?),
        (None, None) => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: "Either effective_date or filename is required".to_string(),
        }),
    }
}

/// Handler for POST `/uploads/monthly` endpoint.
///
/// Loads one monthly rate table into the version for its effective date.
async fn handle_upload_monthly(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MonthlyUploadRequest>,
) -> Result<Json<MonthlyUploadResponse>, HttpError> {
    let effective_date: Date = resolve_effective_date(&req)?;
    info!(
        effective_date = %effective_date,
        bytes = req.csv.len(),
        "Handling monthly upload"
    );

    let parsed = parse_monthly(req.csv.as_bytes())?;
    let options: IngestOptions = IngestOptions {
        create_missing_jurisdictions: req.create_missing_jurisdictions.unwrap_or(true),
    };

    let mut persistence = app_state.persistence.lock().await;
    let report: RunReport = ingest_rows(
        &mut *persistence,
        effective_date,
        &parsed.rows,
        parsed.errors.len(),
        options,
    )?;
    drop(persistence);

    Ok(Json(MonthlyUploadResponse {
        success: true,
        report,
    }))
}

/// Handler for POST `/uploads/historical` endpoint.
///
/// Loads a multi-date historical rate table, one run per effective date.
async fn handle_upload_historical(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<HistoricalUploadRequest>,
) -> Result<Json<HistoricalUploadResponse>, HttpError> {
    let as_of: Date = match &req.as_of {
        Some(text) => parse_effective_date(text)?,
        None => OffsetDateTime::now_utc().date(),
    };
    info!(as_of = %as_of, bytes = req.csv.len(), "Handling historical upload");

    let parsed = parse_historical(req.csv.as_bytes())?;

    let mut persistence = app_state.persistence.lock().await;
    let summary: IngestSummary = ingest_historical(&mut *persistence, &parsed, as_of)?;
    drop(persistence);

    Ok(Json(HistoricalUploadResponse {
        success: true,
        summary,
    }))
}

/// Handler for GET `/versions` endpoint.
///
/// Lists every rate version with its coverage counts.
async fn handle_list_versions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListVersionsResponse>, HttpError> {
    info!("Handling list_versions request");

    let mut persistence = app_state.persistence.lock().await;
    let versions: Vec<VersionCoverage> = persistence.list_version_coverage()?;
    drop(persistence);

    Ok(Json(ListVersionsResponse { versions }))
}

/// Handler for GET `/versions/{rate_version_id}/counties` endpoint.
///
/// Reports which Arizona counties have rates in a version.
async fn handle_county_coverage(
    AxumState(app_state): AxumState<AppState>,
    Path(rate_version_id): Path<i64>,
) -> Result<Json<CountyCoverage>, HttpError> {
    info!(rate_version_id, "Handling county_coverage request");

    let mut persistence = app_state.persistence.lock().await;
    let coverage: CountyCoverage = persistence.county_coverage(rate_version_id)?;
    drop(persistence);

    Ok(Json(coverage))
}

/// Handler for GET `/rates` endpoint.
///
/// Lists rates for a version, optionally filtered by region code and/or
/// business code.
async fn handle_list_rates(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListRatesQuery>,
) -> Result<Json<ListRatesResponse>, HttpError> {
    info!(
        rate_version_id = query.rate_version_id,
        "Handling list_rates request"
    );

    let mut persistence = app_state.persistence.lock().await;
    // 404 for a version that was never created.
    persistence.get_rate_version(query.rate_version_id)?;
    let rates: Vec<RateListing> = persistence.list_rates(
        query.rate_version_id,
        query.region_code.as_deref(),
        query.business_code.as_deref(),
        query.min_total_rate,
    )?;
    drop(persistence);

    Ok(Json(ListRatesResponse {
        rate_version_id: query.rate_version_id,
        rates,
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/uploads/monthly", post(handle_upload_monthly))
        .route("/uploads/historical", post(handle_upload_historical))
        .route("/versions", get(handle_list_versions))
        .route(
            "/versions/{rate_version_id}/counties",
            get(handle_county_coverage),
        )
        .route("/rates", get(handle_list_rates))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing AZ TPT Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
