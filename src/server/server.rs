//! HTTP API: one GET route per chart aggregate, each filterable through
//! query parameters. Chart rendering is entirely the client's business, the
//! routes return flat label/value JSON sequences.

use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use super::{log_requests, state::*, ServerConfig};
use crate::aggregate;
use crate::dataset::SongRecord;
use crate::filter::{self, FilterSpec};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Json<ServerStats> {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        songs: state.dataset.len(),
    })
}

#[derive(Serialize)]
struct FilterOptions {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
}

/// Distinct genres, artist credits and the release-year span of the loaded
/// dataset, for populating filter controls.
async fn get_filter_options(State(dataset): State<SharedDataset>) -> Json<FilterOptions> {
    let mut genres: Vec<String> = dataset
        .iter()
        .filter_map(|record| record.genre.clone())
        .collect();
    genres.sort();
    genres.dedup();

    let mut artists: Vec<String> = dataset
        .iter()
        .map(|record| record.artist_names.clone())
        .filter(|name| !name.is_empty())
        .collect();
    artists.sort();
    artists.dedup();

    let years = aggregate::releases_by_year(&dataset);
    Json(FilterOptions {
        genres,
        artists,
        earliest_year: years.first().map(|entry| entry.year),
        latest_year: years.last().map(|entry| entry.year),
    })
}

fn filtered(dataset: &SharedDataset, spec: &FilterSpec) -> Vec<SongRecord> {
    filter::apply(dataset, spec)
}

async fn get_streaming_trends(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::YearStreams>> {
    Json(aggregate::streams_by_year(&filtered(&dataset, &spec)))
}

#[derive(Deserialize)]
struct MonthlyParams {
    pub year: Option<i32>,
}

async fn get_monthly_activity(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
    Query(params): Query<MonthlyParams>,
) -> Json<Vec<aggregate::MonthStreams>> {
    let subset = filtered(&dataset, &spec);
    let year = params
        .year
        .or_else(|| aggregate::latest_year(&subset))
        .unwrap_or(1970);
    Json(aggregate::streams_by_month(&subset, year))
}

async fn get_release_years(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::YearCount>> {
    Json(aggregate::releases_by_year(&filtered(&dataset, &spec)))
}

#[derive(Deserialize)]
struct TopArtistsParams {
    pub count: Option<usize>,
}

const DEFAULT_TOP_ARTISTS: usize = 10;

async fn get_top_artists(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
    Query(params): Query<TopArtistsParams>,
) -> Json<Vec<aggregate::ArtistStreams>> {
    let count = params.count.unwrap_or(DEFAULT_TOP_ARTISTS);
    Json(aggregate::top_artists(&filtered(&dataset, &spec), count))
}

async fn get_artist_performance(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::ArtistPerformance>> {
    Json(aggregate::artist_performance(&filtered(&dataset, &spec)))
}

async fn get_bpm_histogram(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::BpmBin>> {
    Json(aggregate::bpm_histogram(&filtered(&dataset, &spec)))
}

async fn get_genre_distribution(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::GenreCount>> {
    Json(aggregate::genre_distribution(&filtered(&dataset, &spec)))
}

async fn get_key_distribution(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::KeyCount>> {
    Json(aggregate::key_distribution(&filtered(&dataset, &spec)))
}

async fn get_platform_reach(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::PlatformCount>> {
    Json(aggregate::platform_reach(&filtered(&dataset, &spec)))
}

async fn get_characteristics(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::CharacteristicAvg>> {
    Json(aggregate::characteristic_profile(&filtered(&dataset, &spec)))
}

#[derive(Deserialize)]
struct GenreProfilesParams {
    /// Comma-separated genre names; absent means every genre in the subset.
    pub genres: Option<String>,
}

async fn get_genre_characteristics(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
    Query(params): Query<GenreProfilesParams>,
) -> Json<Vec<aggregate::GenreProfile>> {
    let wanted: Option<Vec<String>> = params.genres.map(|genres| {
        genres
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .map(str::to_owned)
            .collect()
    });
    Json(aggregate::genre_profiles(
        &filtered(&dataset, &spec),
        wanted.as_deref(),
    ))
}

async fn get_bpm_vs_streams(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::ScatterPoint>> {
    Json(aggregate::bpm_vs_streams(&filtered(&dataset, &spec)))
}

async fn get_duration_vs_streams(
    State(dataset): State<SharedDataset>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<aggregate::ScatterPoint>> {
    Json(aggregate::duration_vs_streams(&filtered(&dataset, &spec)))
}

fn make_app(config: ServerConfig, dataset: Vec<SongRecord>) -> Result<Router> {
    let state = ServerState::new(config.clone(), dataset);

    let chart_routes: Router = Router::new()
        .route("/streaming-trends", get(get_streaming_trends))
        .route("/monthly-activity", get(get_monthly_activity))
        .route("/release-years", get(get_release_years))
        .route("/top-artists", get(get_top_artists))
        .route("/artist-performance", get(get_artist_performance))
        .route("/bpm-histogram", get(get_bpm_histogram))
        .route("/genre-distribution", get(get_genre_distribution))
        .route("/key-distribution", get(get_key_distribution))
        .route("/platform-reach", get(get_platform_reach))
        .route("/characteristics", get(get_characteristics))
        .route("/genre-characteristics", get(get_genre_characteristics))
        .route("/bpm-vs-streams", get(get_bpm_vs_streams))
        .route("/duration-vs-streams", get(get_duration_vs_streams))
        .with_state(state.clone());

    let meta_routes: Router = Router::new()
        .route("/filters", get(get_filter_options))
        .with_state(state.clone());

    let mut app = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/v1/charts", chart_routes)
        .nest("/v1/meta", meta_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    if let Some(frontend_dir_path) = &config.frontend_dir_path {
        app = app.fallback_service(ServeDir::new(frontend_dir_path));
    }

    Ok(app)
}

pub async fn run_server(
    dataset: Vec<SongRecord>,
    requests_logging_level: super::RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, dataset)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
