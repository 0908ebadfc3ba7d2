//! Gateway: the HTTP surface in front of the GraphQL schema.
//!
//! Lifecycle:
//! 1. Load + validate config
//! 2. Build the backend client factories and the resolver registry
//! 3. Serve `POST /graphql`, GraphiQL, and the liveness/readiness probes
//! 4. Drain on Ctrl-C
//!
//! All resolver logic lives in `edgecloud-graphql`; this crate only attaches
//! a request context to each GraphQL request.

pub mod graphql_routes;
pub mod server;
pub mod state;

pub use {
    server::{build_gateway_app, start_gateway},
    state::GatewayState,
};
