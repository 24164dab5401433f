use super::Aggregator;
use crate::catalog::Catalog;
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    aggregator: Arc<Aggregator>,
    frontend_path: PathBuf,
}

/// What `/api/home` reports for one mirrored node: its catalog as of the
/// last successful poll cycle plus the current synchronization error, so
/// stale data is served alongside the reason it is stale.
#[derive(Serialize)]
struct NodeView {
    address: String,
    error: Option<String>,
    #[serde(flatten)]
    catalog: Catalog,
}

async fn home_page(State(state): State<AppState>) -> Response {
    match tokio::fs::read(&state.frontend_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response(),
        Err(err) => (
            StatusCode::FORBIDDEN,
            format!("ERROR: Internal error retrieving front-end: {}\n", err),
        )
            .into_response(),
    }
}

async fn api_home(State(state): State<AppState>) -> Response {
    let views: Vec<NodeView> = state
        .aggregator
        .mirrors()
        .iter()
        .map(|mirror| {
            let snapshot = mirror.snapshot();
            NodeView {
                address: mirror.address().to_owned(),
                error: snapshot.error.map(|err| err.to_string()),
                catalog: (*snapshot.catalog).clone(),
            }
        })
        .collect();

    match serde_json::to_string(&views) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => (StatusCode::FORBIDDEN, format!("ERROR: {}\n", err)).into_response(),
    }
}

pub fn make_app(aggregator: Arc<Aggregator>, frontend_path: PathBuf) -> Router {
    let state = AppState {
        aggregator,
        frontend_path,
    };
    Router::new()
        .route("/", get(home_page))
        .route("/api/home", get(api_home))
        .with_state(state)
}

pub async fn run_server(
    aggregator: Arc<Aggregator>,
    frontend_path: PathBuf,
    port: u16,
) -> Result<()> {
    let app = make_app(aggregator, frontend_path);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SyncError;
    use crate::catalog::{Album, Artist, Track};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::io::Write;
    use tower::ServiceExt;

    fn aggregator_with_data() -> Arc<Aggregator> {
        let aggregator = Arc::new(Aggregator::new(&[
            "127.0.0.1:54321".to_owned(),
            "127.0.0.1:54322".to_owned(),
        ]));

        let mut album = Album::new("AL1", "AlbumX", "http://h/cover/A1/AL1");
        album.insert_track(Track::new("T1", "Song1", "http://h/track/A1/AL1/T1"));
        let mut artist = Artist::new("A1", "Alice");
        artist.insert_album(album);
        let mut catalog = Catalog::new();
        catalog.insert_artist(artist);

        aggregator.mirrors()[0].replace(catalog);
        aggregator.mirrors()[1]
            .record_error(SyncError::Transport("connection refused".to_owned()));
        aggregator
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn api_home_reports_one_view_per_mirror() {
        let app = make_app(aggregator_with_data(), PathBuf::from("missing.html"));
        let response = app
            .oneshot(Request::builder().uri("/api/home").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let views = body_json(response).await;
        assert_eq!(views.as_array().unwrap().len(), 2);

        let first = &views[0];
        assert_eq!(first["address"], "127.0.0.1:54321");
        assert!(first["error"].is_null());
        assert_eq!(first["artists"]["A1"]["name"], "Alice");
        assert_eq!(
            first["artists"]["A1"]["albums"]["AL1"]["tracks"]["T1"]["location"],
            "http://h/track/A1/AL1/T1"
        );

        let second = &views[1];
        assert_eq!(second["address"], "127.0.0.1:54322");
        assert!(second["error"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
        assert!(second["artists"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn home_page_serves_the_frontend_asset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<html>discoteca</html>").unwrap();

        let app = make_app(
            Arc::new(Aggregator::new(&[])),
            file.path().to_path_buf(),
        );
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>discoteca</html>");
    }

    #[tokio::test]
    async fn unreadable_frontend_asset_is_forbidden() {
        let app = make_app(
            Arc::new(Aggregator::new(&[])),
            PathBuf::from("/nonexistent/index.html"),
        );
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("ERROR:"));
    }
}
