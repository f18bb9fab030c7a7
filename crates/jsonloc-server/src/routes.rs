//! HTTP routes serving localized strings
//!
//! Every request passes through [`negotiate_culture`], which resolves the
//! active culture from `Accept-Language` and stores it as a
//! [`RequestCulture`] extension for the handlers.

use crate::error::ServerResult;
use axum::{
    extract::{Extension, Path, Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
        HeaderValue,
    },
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use jsonloc_config::ConfigCache;
use jsonloc_i18n::{CacheStats, Culture, LocalizationEngine, LocalizedValue, RequestCulture};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Key of the greeting served by `GET /localization`
pub const GREETING_KEY: &str = "hi";

/// Key of the template served by `GET /localization/{name}`
pub const WELCOME_KEY: &str = "welcome";

/// Shared application state for the HTTP routes
#[derive(Clone)]
pub struct AppState {
    /// Localization engine shared by all requests
    pub engine: Arc<LocalizationEngine>,
    /// Active configuration
    pub config: Arc<ConfigCache>,
}

/// Engine and cache status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Culture used when a request selects none
    pub default_culture: Culture,
    /// Cultures a request may select
    pub supported_cultures: Vec<Culture>,
    /// Directory the resources are read from
    pub resources_path: PathBuf,
    /// Lookup cache statistics
    pub cache: CacheStats,
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/localization", get(get_greeting))
        .route("/localization/all", get(get_all_strings))
        .route("/localization/{name}", get(get_welcome))
        .route("/stats", get(get_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            negotiate_culture,
        ))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Resolve the request's culture and echo it in `Content-Language`
pub async fn negotiate_culture(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let requested = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let culture = state.engine.resolve(requested.as_deref());
    debug!(
        culture = %culture.culture(),
        source = culture.source().as_str(),
        "Resolved request culture"
    );

    let content_language = HeaderValue::from_str(culture.culture().name()).ok();
    request.extensions_mut().insert(culture);

    let mut response = next.run(request).await;
    if let Some(value) = content_language {
        response.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    response
}

async fn get_greeting(
    State(state): State<AppState>,
    Extension(culture): Extension<RequestCulture>,
) -> String {
    state.engine.localizer_for(&culture).get(GREETING_KEY).await.value
}

async fn get_welcome(
    State(state): State<AppState>,
    Extension(culture): Extension<RequestCulture>,
    Path(name): Path<String>,
) -> ServerResult<String> {
    let welcome = state
        .engine
        .localizer_for(&culture)
        .get_formatted(WELCOME_KEY, &[name])
        .await?;
    Ok(welcome.value)
}

async fn get_all_strings(
    State(state): State<AppState>,
    Extension(culture): Extension<RequestCulture>,
) -> ServerResult<Json<Vec<LocalizedValue>>> {
    let mut all = state.engine.localizer_for(&culture).get_all().await?;
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(all))
}

async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        default_culture: state.engine.default_culture().clone(),
        supported_cultures: state.engine.known_cultures().iter().cloned().collect(),
        resources_path: state.config.get().localization.resources_path.clone(),
        cache: state.engine.cache_stats().await,
    })
}

async fn health() -> &'static str {
    "ok"
}
