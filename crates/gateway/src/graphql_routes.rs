//! GraphQL HTTP handlers.
//!
//! GraphiQL on GET `/graphql`, query/mutation execution on POST `/graphql`.
//! Every POST gets its own [`RequestContext`]: a request id, the configured
//! user, the backend call timeout, and a cancellation token that fires when
//! the client goes away.

use std::sync::Arc;

use {
    async_graphql::http::GraphiQLSource,
    async_graphql_axum::{GraphQLRequest, GraphQLResponse},
    axum::{
        Json,
        extract::State,
        http::{HeaderMap, HeaderValue, StatusCode},
        response::{Html, IntoResponse, Response},
    },
    edgecloud_graphql::RequestContext,
    tokio_util::sync::CancellationToken,
    tracing::{Instrument, debug, info_span},
};

use crate::state::GatewayState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Serve GraphiQL, unless disabled in config.
pub async fn graphql_get_handler(State(state): State<Arc<GatewayState>>) -> Response {
    if !state.graphiql {
        return graphiql_disabled_response();
    }
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

/// Handle GraphQL queries and mutations.
pub async fn graphql_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    let request_id = request_id(&headers);

    // Dropped with this future, so an abandoned request cancels its
    // in-flight backend calls.
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let ctx = RequestContext::new(request_id.clone(), state.user_id.clone())
        .with_timeout(state.request_timeout)
        .with_cancellation(cancel);

    let span = info_span!("graphql", request_id = %request_id);
    let response = state
        .schema
        .execute(req.into_inner().data(ctx))
        .instrument(span)
        .await;
    if response.is_err() {
        debug!(request_id = %request_id, errors = response.errors.len(), "graphql request failed");
    }

    let mut response = GraphQLResponse::from(response).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// The caller's `x-request-id`, or a fresh UUID v4.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string)
}

fn graphiql_disabled_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "graphiql is disabled" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(request_id(&headers), "req-42");
    }

    #[test]
    fn request_id_is_generated_when_missing_or_blank() {
        let mut headers = HeaderMap::new();
        let generated = request_id(&headers);
        assert_eq!(generated.len(), 36);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert_ne!(request_id(&headers), "  ");
    }
}
