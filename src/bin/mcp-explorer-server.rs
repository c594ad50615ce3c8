//! mcp-explorer HTTP API.
//!
//! Loads the catalog once at startup and serves read-only JSON views of it:
//!
//! - `GET /health`: server status
//! - `GET /api/records?q=&type=&category=&language=&page=`: one result page
//! - `GET /api/records/{id}`: a single record
//! - `GET /api/stats`: dashboard counters
//! - `GET /api/top?n=`: most-starred records
//! - `GET /api/categories`: category distribution
//! - `GET /api/languages`: language distribution
//!
//! Build and run: `cargo run --features server --bin mcp-explorer-server`

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use mcp_explorer::aggregate::{self, CategoryCount, DashboardSummary, FrequencyTable};
use mcp_explorer::config::ExplorerConfig;
use mcp_explorer::loader::load_catalog;
use mcp_explorer::query::{parse_page_index, search, FilterSpec, ResultPage};
use mcp_explorer::{CanonicalRecord, Catalog, RecordId, RecordType};

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    catalog: Catalog,
    page_size: usize,
    top_n: usize,
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    records: usize,
}

/// Query-string parameters are taken as raw strings so a malformed value
/// degrades to a default instead of a 400 from the extractor.
#[derive(Deserialize, Default)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default, rename = "type")]
    record_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    page: Option<String>,
}

impl SearchParams {
    /// `None` when `type` names no known record type: nothing can match.
    fn to_filter(&self) -> Option<FilterSpec> {
        let record_type = match self.record_type.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<RecordType>().ok()?),
            _ => None,
        };
        Some(FilterSpec {
            query: self.q.clone(),
            record_type,
            category: self.category.clone(),
            language: self.language.clone(),
        })
    }
}

#[derive(Deserialize)]
struct TopParams {
    #[serde(default)]
    n: Option<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.catalog.len(),
    })
}

async fn list_records(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let page: ResultPage<'_> = match params.to_filter() {
        Some(spec) => search(
            &state.catalog,
            &spec,
            parse_page_index(params.page.as_deref()),
            state.page_size,
        ),
        None => {
            tracing::debug!(record_type = ?params.record_type, "unknown record type filter");
            ResultPage::empty()
        }
    };
    serde_json::to_value(&page)
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn get_record(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u32>,
) -> Result<Json<CanonicalRecord>, (StatusCode, String)> {
    state
        .catalog
        .get(RecordId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("record {id} not found")))
}

async fn stats(State(state): State<Arc<ServerState>>) -> Json<DashboardSummary> {
    Json(aggregate::summarize(&state.catalog))
}

async fn top(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<TopParams>,
) -> Json<Vec<CanonicalRecord>> {
    let n = params
        .n
        .as_deref()
        .and_then(|n| n.trim().parse::<usize>().ok())
        .unwrap_or(state.top_n);
    Json(
        aggregate::top_by_stars(&state.catalog, n)
            .into_iter()
            .cloned()
            .collect(),
    )
}

async fn categories(State(state): State<Arc<ServerState>>) -> Json<Vec<CategoryCount>> {
    Json(aggregate::category_distribution(&state.catalog))
}

async fn languages(State(state): State<Arc<ServerState>>) -> Json<FrequencyTable> {
    Json(aggregate::language_distribution(&state.catalog))
}

// ── Main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("MCP_EXPLORER_CONFIG").ok().map(PathBuf::from);
    let config = ExplorerConfig::discover(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!("failed to load config: {e}");
        std::process::exit(1);
    });

    let bind = std::env::var("MCP_EXPLORER_BIND").unwrap_or_else(|_| config.server.bind.clone());
    let port = std::env::var("MCP_EXPLORER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(config.server.port);
    let addr = format!("{bind}:{port}");

    let clients = config.clients_source();
    let servers = config.servers_source();
    let catalog = match tokio::task::spawn_blocking(move || load_catalog(&clients, &servers)).await
    {
        Ok(Ok(catalog)) => catalog,
        Ok(Err(e)) => {
            tracing::error!("failed to load data: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("loader task panicked: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(ServerState {
        catalog,
        page_size: config.page_size,
        top_n: config.top_n,
    });

    tracing::info!(records = state.catalog.len(), "mcp-explorer server initialized");

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/records", get(list_records))
        .route("/api/records/{id}", get(get_record))
        .route("/api/stats", get(stats))
        .route("/api/top", get(top))
        .route("/api/categories", get(categories))
        .route("/api/languages", get(languages))
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("mcp-explorer server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
