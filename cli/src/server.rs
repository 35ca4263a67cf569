use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hoops::{Dashboard, Dataset, Error, FilterOptions, Selection, ALL};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

static PAGE: &str = include_str!("page.html");

pub struct AppState {
    pub dataset: Dataset,
    pub options: FilterOptions,
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub season: Option<i64>,
    pub team: Option<String>,
    pub player: Option<String>,
}

impl DashboardParams {
    fn selection(&self, options: &FilterOptions) -> Option<Selection> {
        let season = self.season.or_else(|| options.seasons.first().copied())?;
        let selection = Selection::new(season)
            .team(self.team.as_deref().unwrap_or(ALL))
            .player(self.player.as_deref().unwrap_or(ALL));
        Some(selection)
    }
}

pub async fn serve(dataset: Dataset, port: u16) -> Result<()> {
    let options = FilterOptions::from_dataset(&dataset)?;
    let state = Arc::new(AppState { dataset, options });

    let app = create_router(state).layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/filters", get(get_filters))
        .route("/api/dashboard", get(get_dashboard))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(PAGE)
}

async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.options.clone())
}

// Recomputed on every request; the dataset itself is shared and never reloaded
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Response {
    log::debug!("dashboard request {:?}", params);
    let Some(selection) = params.selection(&state.options) else {
        log::warn!("dashboard request with no seasons loaded");
        return (StatusCode::INTERNAL_SERVER_ERROR, "No seasons available").into_response();
    };

    // Group-bys over game details are CPU bound; keep them off the async workers
    let dashboard = tokio::task::spawn_blocking(move || {
        state
            .dataset
            .games
            .validate_season(selection.season)
            .and_then(|_| Dashboard::build(&state.dataset, &selection))
    })
    .await;

    match dashboard {
        Ok(Ok(dashboard)) => Json(dashboard).into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => {
            log::error!("dashboard task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard task failed").into_response()
        }
    }
}

fn error_response(err: Error) -> Response {
    let status = match err {
        Error::UnknownTeam(_) | Error::UnknownSeason(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    log::warn!("dashboard request failed: {}", err);
    (status, err.to_string()).into_response()
}
