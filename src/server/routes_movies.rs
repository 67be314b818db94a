//! Radarr catalog endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::lists::Movie;

use super::AppContext;

/// GET /api/movies - downloaded movies from the Radarr library.
pub async fn list_movies(State(ctx): State<AppContext>) -> Response {
    let catalog = match ctx.radarr.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to fetch Radarr catalog: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("radarr: {}", e) })),
            )
                .into_response();
        }
    };

    let movies: Vec<Movie> = catalog
        .iter()
        .filter(|m| m.has_file)
        .map(Movie::from_radarr)
        .collect();

    Json(movies).into_response()
}
