//! Backend service contracts for the edgecloud gateway.
//!
//! Each backend domain (tenant, project, edge cluster) gets its protobuf
//! message types, an async client trait, and a client factory trait. The
//! gateway never holds a long-lived connection: every call site asks a
//! factory for a fresh [`Client`], and the client closes its connection when
//! it goes out of scope. `Noop` factories let the gateway boot before a
//! backend is configured.

pub mod common;
pub mod edge_cluster;
pub mod project;
pub mod tenant;

use std::{ops::Deref, sync::Arc};

use {async_trait::async_trait, tracing::warn};

pub use {
    common::BusinessOutcome, edge_cluster::EdgeClusterService, project::ProjectService,
    tenant::TenantService,
};

/// Error type returned by backend clients and client factories.
///
/// Every variant is a transport-level failure: the RPC did not complete. A
/// completed RPC that reports a domain failure is not a `ServiceError`, it is
/// a response whose [`BusinessOutcome`] is not success.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Message { message: String },
    #[error("backend {address} unavailable: {message}")]
    Unavailable { address: String, message: String },
    #[error("rpc failed ({code}): {message}")]
    Status { code: String, message: String },
    #[error("request cancelled")]
    Cancelled,
}

impl ServiceError {
    #[must_use]
    pub fn message(message: impl std::fmt::Display) -> Self {
        Self::Message {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unavailable(address: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            address: address.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn status(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Status {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<String> for ServiceError {
    fn from(value: String) -> Self {
        Self::message(value)
    }
}

impl From<&str> for ServiceError {
    fn from(value: &str) -> Self {
        Self::message(value)
    }
}

impl From<ServiceError> for edgecloud_common::Error {
    fn from(err: ServiceError) -> Self {
        Self::transport(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

// ── Scoped client ───────────────────────────────────────────────────────────

/// An open channel to a backend.
pub trait Connection: Send + Sync {
    fn close(&self);
}

/// A typed backend client bound to one private connection.
///
/// The connection is closed exactly once: either by [`Client::close`] or when
/// the client is dropped. Dropping covers early `?` returns and futures that
/// are cancelled mid-call.
pub struct Client<S: ?Sized> {
    service: Box<S>,
    connection: Option<Box<dyn Connection>>,
}

impl<S: ?Sized> Client<S> {
    pub fn new(service: Box<S>, connection: Box<dyn Connection>) -> Self {
        Self {
            service,
            connection: Some(connection),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
    }
}

impl<S: ?Sized> Deref for Client<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.service
    }
}

impl<S: ?Sized> Drop for Client<S> {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Client factories ────────────────────────────────────────────────────────

#[async_trait]
pub trait TenantClientFactory: Send + Sync {
    async fn create_client(&self) -> ServiceResult<Client<dyn TenantService>>;
}

#[async_trait]
pub trait ProjectClientFactory: Send + Sync {
    async fn create_client(&self) -> ServiceResult<Client<dyn ProjectService>>;
}

#[async_trait]
pub trait EdgeClusterClientFactory: Send + Sync {
    async fn create_client(&self) -> ServiceResult<Client<dyn EdgeClusterService>>;
}

pub struct NoopTenantClientFactory;

#[async_trait]
impl TenantClientFactory for NoopTenantClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn TenantService>> {
        warn!("tenant backend requested but not configured");
        Err(ServiceError::unavailable("tenant", "not configured"))
    }
}

pub struct NoopProjectClientFactory;

#[async_trait]
impl ProjectClientFactory for NoopProjectClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn ProjectService>> {
        warn!("project backend requested but not configured");
        Err(ServiceError::unavailable("project", "not configured"))
    }
}

pub struct NoopEdgeClusterClientFactory;

#[async_trait]
impl EdgeClusterClientFactory for NoopEdgeClusterClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn EdgeClusterService>> {
        warn!("edge-cluster backend requested but not configured");
        Err(ServiceError::unavailable("edge-cluster", "not configured"))
    }
}

// ── Backends bundle ─────────────────────────────────────────────────────────

/// The client factories the gateway dispatches to, one per backend domain.
#[derive(Clone)]
pub struct Backends {
    pub tenant: Arc<dyn TenantClientFactory>,
    pub project: Arc<dyn ProjectClientFactory>,
    pub edge_cluster: Arc<dyn EdgeClusterClientFactory>,
}

impl Default for Backends {
    fn default() -> Self {
        Self {
            tenant: Arc::new(NoopTenantClientFactory),
            project: Arc::new(NoopProjectClientFactory),
            edge_cluster: Arc::new(NoopEdgeClusterClientFactory),
        }
    }
}

impl Backends {
    #[must_use]
    pub fn with_tenant(mut self, factory: Arc<dyn TenantClientFactory>) -> Self {
        self.tenant = factory;
        self
    }

    #[must_use]
    pub fn with_project(mut self, factory: Arc<dyn ProjectClientFactory>) -> Self {
        self.project = factory;
        self
    }

    #[must_use]
    pub fn with_edge_cluster(mut self, factory: Arc<dyn EdgeClusterClientFactory>) -> Self {
        self.edge_cluster = factory;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingConnection(Arc<AtomicUsize>);

    impl Connection for CountingConnection {
        fn close(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Unreachable;

    #[async_trait]
    impl TenantService for Unreachable {
        async fn create_tenant(
            &self,
            _request: tenant::CreateTenantRequest,
        ) -> ServiceResult<tenant::CreateTenantResponse> {
            Err(ServiceError::Cancelled)
        }

        async fn read_tenant(
            &self,
            _request: tenant::ReadTenantRequest,
        ) -> ServiceResult<tenant::ReadTenantResponse> {
            Err(ServiceError::Cancelled)
        }

        async fn update_tenant(
            &self,
            _request: tenant::UpdateTenantRequest,
        ) -> ServiceResult<tenant::UpdateTenantResponse> {
            Err(ServiceError::Cancelled)
        }

        async fn delete_tenant(
            &self,
            _request: tenant::DeleteTenantRequest,
        ) -> ServiceResult<tenant::DeleteTenantResponse> {
            Err(ServiceError::Cancelled)
        }

        async fn list_tenants(
            &self,
            _request: tenant::ListTenantsRequest,
        ) -> ServiceResult<tenant::ListTenantsResponse> {
            Err(ServiceError::Cancelled)
        }
    }

    fn client(closed: &Arc<AtomicUsize>) -> Client<dyn TenantService> {
        let service: Box<dyn TenantService> = Box::new(Unreachable);
        Client::new(service, Box::new(CountingConnection(Arc::clone(closed))))
    }

    #[test]
    fn drop_closes_connection_once() {
        let closed = Arc::new(AtomicUsize::new(0));
        drop(client(&closed));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_close_does_not_close_twice() {
        let closed = Arc::new(AtomicUsize::new(0));
        client(&closed).close();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn early_return_still_closes() {
        async fn call(client: Client<dyn TenantService>) -> ServiceResult<()> {
            client
                .read_tenant(tenant::ReadTenantRequest {
                    tenant_id: "t1".into(),
                })
                .await?;
            Ok(())
        }

        let closed = Arc::new(AtomicUsize::new(0));
        assert!(call(client(&closed)).await.is_err());
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn noop_factories_report_unavailable() {
        let backends = Backends::default();
        let err = backends.project.create_client().await.err();
        assert!(matches!(err, Some(ServiceError::Unavailable { .. })));
    }

    #[test]
    fn service_error_maps_to_transport() {
        let err: edgecloud_common::Error = ServiceError::status("Unavailable", "dial failed").into();
        assert_eq!(err.code(), "TRANSPORT");
        assert_eq!(err.to_string(), "rpc failed (Unavailable): dial failed");
    }
}
