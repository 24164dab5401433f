use crate::catalog::Catalog;
use crate::listing::encode;
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

// The catalog is immutable after startup, so handlers share it without a
// lock.
type SharedCatalog = Arc<Catalog>;

async fn get_listing(State(catalog): State<SharedCatalog>, headers: HeaderMap) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        encode(&catalog, host),
    )
        .into_response()
}

/// Reads the file a catalog entry points at. A path that cannot be read is
/// a 403, not a crash; the entry stays in the catalog.
async fn serve_file(location: &str, content_type: Option<&str>) -> Response {
    match tokio::fs::read(location).await {
        Ok(bytes) => {
            let content_type = match content_type {
                Some(content_type) => content_type.to_owned(),
                None => infer::get(&bytes)
                    .map(|kind| kind.mime_type().to_owned())
                    .unwrap_or_else(|| "application/octet-stream".to_owned()),
            };
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(err) => (
            StatusCode::FORBIDDEN,
            format!("ERROR: Internal error retrieving file: {}\n", err),
        )
            .into_response(),
    }
}

async fn get_cover(State(catalog): State<SharedCatalog>, Path(path): Path<String>) -> Response {
    let parts: Vec<&str> = path.split('/').collect();
    let (artist_id, album_id) = match parts.as_slice() {
        [artist_id, album_id] => (*artist_id, *album_id),
        _ => {
            return (StatusCode::BAD_REQUEST, "ERROR: Malformed cover request\n").into_response()
        }
    };

    if catalog.artist(artist_id).is_none() {
        return (StatusCode::NOT_FOUND, "ERROR: Artist not found\n").into_response();
    }
    let Some(album) = catalog.album(artist_id, album_id) else {
        return (StatusCode::NOT_FOUND, "ERROR: Album not found\n").into_response();
    };

    serve_file(&album.cover, None).await
}

async fn get_track(State(catalog): State<SharedCatalog>, Path(path): Path<String>) -> Response {
    let parts: Vec<&str> = path.split('/').collect();
    let (artist_id, album_id, track_id) = match parts.as_slice() {
        [artist_id, album_id, track_id] => (*artist_id, *album_id, *track_id),
        _ => {
            return (StatusCode::BAD_REQUEST, "ERROR: Malformed track request\n").into_response()
        }
    };

    if catalog.artist(artist_id).is_none() {
        return (StatusCode::NOT_FOUND, "ERROR: Artist not found\n").into_response();
    }
    if catalog.album(artist_id, album_id).is_none() {
        return (StatusCode::NOT_FOUND, "ERROR: Album not found\n").into_response();
    }
    let Some(track) = catalog.track(artist_id, album_id, track_id) else {
        return (StatusCode::NOT_FOUND, "ERROR: Track not found\n").into_response();
    };

    serve_file(&track.location, Some("audio/mpeg")).await
}

// Cover and track routes take the whole remainder of the path so a request
// with the wrong number of segments can be answered with 400 instead of
// falling through to the router's 404.
pub fn make_app(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/list", get(get_listing))
        .route("/cover/{*path}", get(get_cover))
        .route("/track/{*path}", get(get_track))
        .with_state(catalog)
}

pub async fn run_server(catalog: Arc<Catalog>, port: u16) -> Result<()> {
    let app = make_app(catalog);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    Ok(axum::serve(listener, app).await?)
}
