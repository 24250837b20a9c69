use axum::{
    extract::State,
    Json,
    http::StatusCode,
};
use serde::Serialize;
use crate::graph::GraphData;
use crate::server::AppState;
use crate::{Analyzer, Error};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /graph` with the source text as the request body
pub async fn build_graph(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<GraphData>, ApiError> {
    let config = state.config.clone();

    let result = tokio::task::spawn_blocking(move || {
        let mut analyzer = Analyzer::from_config(&config)?;
        analyzer.analyze(&body).map(|graph| graph.to_data())
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    match result {
        Ok(data) => Ok(Json(data)),
        Err(e @ Error::Parse(_)) => Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e)),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}
