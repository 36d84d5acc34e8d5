//! Router tests against an in-memory block source.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pgbv_core::model::{Relation, Table, Toast};
use pgbv_db::MemoryBlockSource;
use pgbv_layout::{LayoutConfig, LayoutEngine, Size};
use pgbv_render::TableRenderer;
use pgbv_server::{AppState, router};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const MAX_SIZE: usize = 16 * 1024 * 1024;

fn source() -> MemoryBlockSource {
    MemoryBlockSource::new()
        .with_table(
            Table::new(Relation::new("accounts", vec![8192; 40]))
                .with_index(Relation::new("accounts_pkey", vec![0; 4])),
        )
        .with_table(
            Table::new(Relation::new("docs", vec![1024; 9])).with_toast(Toast::new(
                Relation::new("pg_toast_16390", vec![0; 2]),
                Relation::new("pg_toast_16390_index", vec![0]),
            )),
        )
}

fn app_with(source: MemoryBlockSource) -> Router {
    let engine = LayoutEngine::new(LayoutConfig::new(Size::new(10, 10), Size::new(3, 3)));
    router(
        AppState::new(Arc::new(source), TableRenderer::new(engine))
            .timeout(Duration::from_secs(5)),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), MAX_SIZE).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn probes_answer_ok() {
    for uri in ["/readiness", "/health"] {
        let (status, _, body) = get(app_with(source()), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ok");
    }
}

#[tokio::test]
async fn relations_are_listed_newest_first() {
    let (status, content_type, body) = get(app_with(source()), "/relations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let names: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(names, ["docs", "accounts"]);
}

#[tokio::test]
async fn index_links_every_table() {
    let (status, content_type, body) = get(app_with(source()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("<a href=\"/buffer_viz/accounts\">accounts</a>"));
    assert!(body.contains("<a href=\"/buffer_viz/docs\">docs</a>"));
}

#[tokio::test]
async fn index_without_tables() {
    let (status, _, body) = get(app_with(MemoryBlockSource::new()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No tables found."));
}

#[tokio::test]
async fn buffer_viz_serves_svg() {
    let (status, content_type, body) = get(app_with(source()), "/buffer_viz/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("id=\"docs_8\""));
    assert!(body.contains("id=\"pg_toast_16390_index_0\""));
    assert!(body.contains("function init(evt)"));
}

#[tokio::test]
async fn buffer_viz_without_script() {
    let engine = LayoutEngine::new(LayoutConfig::default());
    let app = router(
        AppState::new(Arc::new(source()), TableRenderer::new(engine)).interactive(false),
    );
    let (status, _, body) = get(app, "/buffer_viz/accounts").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<script"));
}

#[tokio::test]
async fn unknown_table_is_404_with_json_error() {
    let (status, content_type, body) = get(app_with(source()), "/buffer_viz/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let error: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "relation \"missing\" does not exist");
}

#[tokio::test(start_paused = true)]
async fn slow_source_is_504() {
    let app = app_with(source().with_delay(Duration::from_secs(60)));
    let (status, _, body) = get(app, "/buffer_viz/docs").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body.contains("timed out"));
}
