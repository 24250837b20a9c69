use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::RefgraphConfig;

pub mod routes;

/// Server state
pub struct AppState {
    pub config: RefgraphConfig,
}

pub fn router(config: RefgraphConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/graph", post(routes::build_graph))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, config: RefgraphConfig) -> anyhow::Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    crate::ui::listening(&addr.to_string());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
