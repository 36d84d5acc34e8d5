#![forbid(unsafe_code)]

use askama::Template;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};

use crate::{AppError, AppState};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    names: Vec<String>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let names = state.source.list_relation_names().await?;
    Ok(Html(IndexTemplate { names }.render()?))
}

pub async fn relations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.source.list_relation_names().await?))
}

pub async fn buffer_viz(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let table = pgbv_db::fetch_table_within(state.source.as_ref(), &table, state.timeout).await?;

    let renderer = state.renderer;
    let interactive = state.interactive;
    let svg = tokio::task::spawn_blocking(move || {
        pgbv_render::render_svg(&renderer, &table, interactive)
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

pub async fn readiness() -> &'static str {
    "Ok"
}

pub async fn health() -> &'static str {
    "Ok"
}
