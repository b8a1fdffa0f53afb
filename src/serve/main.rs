//! Map data server.
//!
//! Loads the dataset once at startup and serves markers, camera state,
//! GeoJSON and the firm index to a map front-end. Every request recomputes
//! its answer from the loaded snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use archmap::config::TileLayer;
use archmap::dataset::{DataSource, Dataset};
use archmap::firms::FirmIndex;
use archmap::geojson::FeatureCollection;
use archmap::projector::parse_points;
use archmap::{FirmFilter, GeoPointProjector, ProjectorConfig, RawRecord, ViewState};

mod markers;
use markers::{build_markers, MarkerSet};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Firm names may contain commas, so the list parameter uses pipes
const FIRM_SEPARATOR: char = '|';

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Map data server for architectural works")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Dataset path (optionally .gz) or http(s) URL
    #[arg(short, long, default_value = "data.json")]
    data: DataSource,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

/// Application state shared across handlers
struct AppState {
    projector: GeoPointProjector,
    records: Vec<RawRecord>,
    /// Records with usable coordinates, counted once at load
    point_count: usize,
    firms: FirmIndex,
    loaded_at: DateTime<Utc>,
}

impl AppState {
    fn new(projector: GeoPointProjector, records: Vec<RawRecord>) -> Self {
        let firms = FirmIndex::from_records(&records);
        let point_count = parse_points(&records).len();
        Self {
            projector,
            records,
            point_count,
            firms,
            loaded_at: Utc::now(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Archmap Server");

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ProjectorConfig::load_from_file(path)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ProjectorConfig::default(),
    };

    let dataset = Dataset::load(&args.data)
        .await
        .with_context(|| format!("Failed to load dataset from {}", args.data))?;

    let state = Arc::new(AppState::new(
        GeoPointProjector::new(config),
        dataset.records,
    ));
    info!(
        "{} records, {} with coordinates, {} firms",
        state.records.len(),
        state.point_count,
        state.firms.total_firms
    );
    for (rank, firm) in state.firms.top(10).iter().enumerate() {
        debug!("{}. {}: {} projects", rank + 1, firm.name, firm.count);
    }

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/markers", get(markers_handler))
        .route("/v1/view", get(view_handler))
        .route("/v1/geojson", get(geojson_handler))
        .route("/v1/firms", get(firms_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct FirmParams {
    /// Selected firms: "A|B|C"
    firms: Option<String>,
}

impl FirmParams {
    fn filter(&self) -> FirmFilter {
        self.firms
            .as_deref()
            .map(|list| {
                // "?firms=" and trailing separators select nothing extra
                FirmFilter::new(
                    list.split(FIRM_SEPARATOR)
                        .filter(|name| !name.trim().is_empty()),
                )
            })
            .unwrap_or_default()
    }
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: state.records.len(),
        points: state.point_count,
        loaded_at: state.loaded_at,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    points: usize,
    loaded_at: DateTime<Utc>,
}

/// Filtered markers with popup content, plus the camera that frames them
async fn markers_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FirmParams>,
) -> Json<MarkerSet> {
    let filter = params.filter();
    let (points, view) = state.projector.project(&state.records, &filter);
    debug!("{} markers for {} selected firms", points.len(), filter.len());

    Json(build_markers(&state.projector, &points, view))
}

/// Camera and tile source only
async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FirmParams>,
) -> Json<ViewResponse> {
    let (_, view) = state.projector.project(&state.records, &params.filter());

    Json(ViewResponse {
        view,
        tiles: state.projector.config().tiles.clone(),
    })
}

#[derive(Serialize)]
struct ViewResponse {
    view: ViewState,
    tiles: TileLayer,
}

/// Filtered points as a GeoJSON FeatureCollection
async fn geojson_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FirmParams>,
) -> Json<FeatureCollection> {
    let (points, _) = state.projector.project(&state.records, &params.filter());
    Json(FeatureCollection::from_points(&points))
}

/// Firm options for the filter control
async fn firms_handler(State(state): State<Arc<AppState>>) -> Json<FirmIndex> {
    Json(state.firms.clone())
}
