use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use docsite_core::{load_index, search, IndexError, LanguageCode, SearchIndex};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub lang: LanguageCode,
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub lang: LanguageCode,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub score: u32,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    site_dir: PathBuf,
    indexes: Arc<RwLock<HashMap<LanguageCode, Arc<SearchIndex>>>>,
}

impl AppState {
    /// Loaded artifact for `lang`, read from disk at most once per process.
    /// Failed loads are not cached, so a later request retries.
    fn index_for(&self, lang: LanguageCode) -> Result<Arc<SearchIndex>, IndexError> {
        if let Some(index) = self.indexes.read().get(&lang) {
            return Ok(Arc::clone(index));
        }
        let path = self.site_dir.join("search").join(format!("{lang}.json"));
        let index = Arc::new(load_index(&path)?);
        self.indexes.write().insert(lang, Arc::clone(&index));
        Ok(index)
    }
}

/// Router serving the generated site directory plus the search API.
pub fn build_app(site_dir: PathBuf) -> Router {
    let state = AppState {
        site_dir: site_dir.clone(),
        indexes: Arc::new(RwLock::new(HashMap::new())),
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/search", get(search_handler))
        .fallback_service(ServeDir::new(site_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// An unusable artifact is a 503 with an error body, never an empty result
/// list, so clients can tell "search unavailable" from "no matches".
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorBody>)> {
    let index = state.index_for(params.lang).map_err(|err| {
        tracing::warn!(lang = %params.lang, %err, "search index unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
    })?;

    let hits = search(&index, &params.q);
    let results: Vec<SearchResult> = hits
        .into_iter()
        .map(|hit| SearchResult {
            slug: hit.page.slug,
            title: hit.page.title,
            url: hit.page.url,
            excerpt: hit.page.excerpt,
            score: hit.score,
        })
        .collect();

    Ok(Json(SearchResponse {
        query: params.q,
        lang: params.lang,
        total: results.len(),
        results,
    }))
}
