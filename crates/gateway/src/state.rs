//! Shared, read-only state behind every handler.

use std::{sync::Arc, time::Duration};

use {
    edgecloud_config::GatewayConfig,
    edgecloud_graphql::{EdgeCloudSchema, Registry, ResolverRegistry, build_schema},
    edgecloud_service_traits::Backends,
};

pub struct GatewayState {
    pub schema: EdgeCloudSchema,
    /// Serve GraphiQL on `GET /graphql`.
    pub graphiql: bool,
    pub user_id: String,
    pub request_timeout: Option<Duration>,
    pub version: &'static str,
}

impl GatewayState {
    /// Wire the registry and schema around `backends`.
    #[must_use]
    pub fn new(config: &GatewayConfig, backends: Backends) -> Arc<Self> {
        let registry: Arc<dyn ResolverRegistry> = Registry::new(backends);
        let request_timeout = config.graphql.request_timeout();
        Arc::new(Self {
            schema: build_schema(registry, config.graphql.user_id.clone(), request_timeout),
            graphiql: config.graphql.graphiql,
            user_id: config.graphql.user_id.clone(),
            request_timeout,
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// State backed by the gRPC services named in `config`.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Arc<Self> {
        let backends = edgecloud_grpc::backends(
            &config.backends.tenant_address,
            &config.backends.project_address,
            &config.backends.edge_cluster_address,
            config.backends.connect_timeout(),
        );
        Self::new(config, backends)
    }
}
