//! Poster lookup endpoint.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::AppContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PosterLookup {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    radarr_poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radarr_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tvdb_poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tvdb_error: Option<String>,
}

/// GET /api/poster?query=<title> - look up poster artwork by title.
///
/// Queries Radarr (through the TTL cache) and TVDB independently; either
/// side can fail without hiding the other's result.
pub async fn lookup_poster(
    State(ctx): State<AppContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(query) = params.get("query").map(|q| q.trim()).filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing 'query' parameter" })),
        )
            .into_response();
    };

    let (radarr, tvdb) = tokio::join!(
        ctx.resolver.resolve(query),
        ctx.tvdb.search_poster(query)
    );

    let (radarr_poster, radarr_error) = match radarr {
        Ok(url) => (Some(url), None),
        Err(e) => (None, Some(e.to_string())),
    };
    let (tvdb_poster, tvdb_error) = match tvdb {
        Ok(url) => (Some(url), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Json(PosterLookup {
        query: query.to_string(),
        radarr_poster,
        radarr_error,
        tvdb_poster,
        tvdb_error,
    })
    .into_response()
}
