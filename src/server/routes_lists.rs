//! List management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::lists::{ListError, Movie, MovieList};

use super::AppContext;

fn list_error_response(e: ListError) -> Response {
    let status = match &e {
        ListError::NotFound(_) => StatusCode::NOT_FOUND,
        ListError::InvalidName(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// GET /api/lists - every stored list.
pub async fn list_lists(State(ctx): State<AppContext>) -> Response {
    match ctx.lists.load_all() {
        Ok(lists) => Json(lists).into_response(),
        Err(e) => list_error_response(e),
    }
}

/// GET /api/lists/:name - a single list by name.
pub async fn get_list(State(ctx): State<AppContext>, Path(name): Path<String>) -> Response {
    match ctx.lists.load(&name) {
        Ok(list) => Json(list).into_response(),
        Err(e) => list_error_response(e),
    }
}

/// DELETE /api/lists/:name
pub async fn delete_list(State(ctx): State<AppContext>, Path(name): Path<String>) -> Response {
    match ctx.lists.delete(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => list_error_response(e),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// POST /api/lists - create or replace a list.
///
/// The list is saved immediately and returned; poster downloads run in the
/// background and re-save the list with `cachedPoster` filled in as they
/// complete.
pub async fn create_list(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateListRequest>,
) -> Response {
    let list = MovieList::new(req.name, req.movies);
    if let Err(e) = ctx.lists.save(&list) {
        return list_error_response(e);
    }

    let name = list.name.clone();
    let downloader = ctx.downloader.clone();
    let store = ctx.lists.clone();
    let saved_movies = list.movies.clone();
    let mut movies = list.movies.clone();
    tokio::spawn(async move {
        let cached = downloader.cache_posters(&mut movies).await;
        if cached == 0 {
            return;
        }

        // Re-read before writing back so we do not clobber a list that was
        // replaced while the downloads ran.
        match store.load(&name) {
            Ok(mut current) if current.movies == saved_movies => {
                current.movies = movies;
                current.updated_at = Utc::now();
                if let Err(e) = store.save(&current) {
                    tracing::warn!(list = %name, error = %e, "Failed to record cached posters");
                } else {
                    tracing::info!(list = %name, cached, "Cached posters for list");
                }
            }
            Ok(_) => {
                tracing::debug!(list = %name, "List changed during poster caching; leaving as-is");
            }
            Err(e) => {
                tracing::debug!(list = %name, error = %e, "List gone during poster caching");
            }
        }
    });

    (StatusCode::CREATED, Json(list)).into_response()
}
