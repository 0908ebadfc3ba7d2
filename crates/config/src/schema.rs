//! Config schema types (server, backends, graphql).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub backends: BackendsConfig,
    pub graphql: GraphqlConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "0.0.0.0".
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Where the three backend services listen.
///
/// Addresses are `host:port` or full URIs; a missing scheme means plain
/// `http://`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendsConfig {
    pub tenant_address: String,
    pub project_address: String,
    pub edge_cluster_address: String,
    pub connect_timeout_secs: u64,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            tenant_address: String::new(),
            project_address: String::new(),
            edge_cluster_address: String::new(),
            connect_timeout_secs: 5,
        }
    }
}

impl BackendsConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Serve GraphiQL on `GET /graphql`.
    pub graphiql: bool,
    /// User every request acts as.
    pub user_id: String,
    /// Per backend call. `0` disables the limit.
    pub request_timeout_secs: u64,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            graphiql: true,
            user_id: "anonymous".into(),
            request_timeout_secs: 30,
        }
    }
}

impl GraphqlConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backends.connect_timeout(), Duration::from_secs(5));
        assert!(config.graphql.graphiql);
        assert_eq!(config.graphql.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_request_timeout_disables_limit() {
        let graphql = GraphqlConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(graphql.request_timeout(), None);
    }
}
