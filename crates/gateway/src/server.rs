use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router,
        extract::State,
        http::Request,
        response::{IntoResponse, Json},
        routing::get,
    },
    edgecloud_config::GatewayConfig,
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::{info, info_span},
};

use crate::{
    graphql_routes::{REQUEST_ID_HEADER, graphql_get_handler, graphql_handler},
    state::GatewayState,
};

// ── Server startup ──────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info_span!(
            "http",
            method = %req.method(),
            path = %req.uri().path(),
            request_id,
        )
    });

    Router::new()
        .route("/graphql", get(graphql_get_handler).post(graphql_handler))
        .route("/live", get(live_handler))
        .route("/ready", get(ready_handler))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

/// Bind, serve, and drain in-flight requests on Ctrl-C.
pub async fn start_gateway(config: &GatewayConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow::anyhow!(
                "invalid bind address {}:{}: {e}",
                config.server.bind,
                config.server.port
            )
        })?;

    let state = GatewayState::from_config(config);
    let app = build_gateway_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        tenant = %config.backends.tenant_address,
        project = %config.backends.project_address,
        edge_cluster = %config.backends.edge_cluster_address,
        graphiql = config.graphql.graphiql,
        "edgecloud gateway listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("edgecloud gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

// ── Handlers ────────────────────────────────────────────────────────────────

async fn live_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ready_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": state.version }))
}
