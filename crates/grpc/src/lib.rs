//! gRPC client factories for the tenant, project, and edge-cluster backends.
//!
//! Every `create_client` call dials a fresh [`Channel`]; nothing is pooled.
//! The returned [`Client`] owns the channel and closing it (explicitly or by
//! drop) releases the connection.

mod transport;

use std::{sync::Arc, time::Duration};

use {
    async_trait::async_trait,
    edgecloud_service_traits::{
        Backends, Client, EdgeClusterClientFactory, EdgeClusterService, ProjectClientFactory,
        ProjectService, ServiceResult, TenantClientFactory, TenantService,
        edge_cluster::{
            CreateEdgeClusterRequest, CreateEdgeClusterResponse, DeleteEdgeClusterRequest,
            DeleteEdgeClusterResponse, ListEdgeClusterNodesRequest, ListEdgeClusterNodesResponse,
            ListEdgeClusterPodsRequest, ListEdgeClusterPodsResponse,
            ListEdgeClusterServicesRequest, ListEdgeClusterServicesResponse,
            ListEdgeClustersRequest, ListEdgeClustersResponse, ReadEdgeClusterRequest,
            ReadEdgeClusterResponse, UpdateEdgeClusterRequest, UpdateEdgeClusterResponse,
        },
        project::{
            CreateProjectRequest, CreateProjectResponse, DeleteProjectRequest,
            DeleteProjectResponse, ListProjectsRequest, ListProjectsResponse, ReadProjectRequest,
            ReadProjectResponse, UpdateProjectRequest, UpdateProjectResponse,
        },
        tenant::{
            CreateTenantRequest, CreateTenantResponse, DeleteTenantRequest, DeleteTenantResponse,
            ListTenantsRequest, ListTenantsResponse, ReadTenantRequest, ReadTenantResponse,
            UpdateTenantRequest, UpdateTenantResponse,
        },
    },
};

pub use transport::{BackendEndpoint, normalize_address};
use transport::Transport;

/// Build a [`Backends`] bundle dialing the given addresses.
#[must_use]
pub fn backends(
    tenant_address: &str,
    project_address: &str,
    edge_cluster_address: &str,
    connect_timeout: Duration,
) -> Backends {
    Backends {
        tenant: Arc::new(GrpcTenantClientFactory::new(BackendEndpoint::new(
            tenant_address,
            connect_timeout,
        ))),
        project: Arc::new(GrpcProjectClientFactory::new(BackendEndpoint::new(
            project_address,
            connect_timeout,
        ))),
        edge_cluster: Arc::new(GrpcEdgeClusterClientFactory::new(BackendEndpoint::new(
            edge_cluster_address,
            connect_timeout,
        ))),
    }
}

// ── Tenant ──────────────────────────────────────────────────────────────────

/// The tenant service exposes its listing as `Search`, unlike the other two.
const TENANT_SEARCH: &str = "/tenant.Service/Search";

pub struct GrpcTenantClientFactory {
    endpoint: BackendEndpoint,
}

impl GrpcTenantClientFactory {
    #[must_use]
    pub fn new(endpoint: BackendEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TenantClientFactory for GrpcTenantClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn TenantService>> {
        let (transport, connection) = self.endpoint.connect().await?;
        let service: Box<dyn TenantService> = Box::new(GrpcTenantService(transport));
        Ok(Client::new(service, connection))
    }
}

struct GrpcTenantService(Transport);

#[async_trait]
impl TenantService for GrpcTenantService {
    async fn create_tenant(
        &self,
        request: CreateTenantRequest,
    ) -> ServiceResult<CreateTenantResponse> {
        self.0.unary("/tenant.Service/CreateTenant", request).await
    }

    async fn read_tenant(&self, request: ReadTenantRequest) -> ServiceResult<ReadTenantResponse> {
        self.0.unary("/tenant.Service/ReadTenant", request).await
    }

    async fn update_tenant(
        &self,
        request: UpdateTenantRequest,
    ) -> ServiceResult<UpdateTenantResponse> {
        self.0.unary("/tenant.Service/UpdateTenant", request).await
    }

    async fn delete_tenant(
        &self,
        request: DeleteTenantRequest,
    ) -> ServiceResult<DeleteTenantResponse> {
        self.0.unary("/tenant.Service/DeleteTenant", request).await
    }

    async fn list_tenants(&self, request: ListTenantsRequest) -> ServiceResult<ListTenantsResponse> {
        self.0.unary(TENANT_SEARCH, request).await
    }
}

// ── Project ─────────────────────────────────────────────────────────────────

pub struct GrpcProjectClientFactory {
    endpoint: BackendEndpoint,
}

impl GrpcProjectClientFactory {
    #[must_use]
    pub fn new(endpoint: BackendEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl ProjectClientFactory for GrpcProjectClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn ProjectService>> {
        let (transport, connection) = self.endpoint.connect().await?;
        let service: Box<dyn ProjectService> = Box::new(GrpcProjectService(transport));
        Ok(Client::new(service, connection))
    }
}

struct GrpcProjectService(Transport);

#[async_trait]
impl ProjectService for GrpcProjectService {
    async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ServiceResult<CreateProjectResponse> {
        self.0.unary("/project.Service/CreateProject", request).await
    }

    async fn read_project(&self, request: ReadProjectRequest) -> ServiceResult<ReadProjectResponse> {
        self.0.unary("/project.Service/ReadProject", request).await
    }

    async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> ServiceResult<UpdateProjectResponse> {
        self.0.unary("/project.Service/UpdateProject", request).await
    }

    async fn delete_project(
        &self,
        request: DeleteProjectRequest,
    ) -> ServiceResult<DeleteProjectResponse> {
        self.0.unary("/project.Service/DeleteProject", request).await
    }

    async fn list_projects(
        &self,
        request: ListProjectsRequest,
    ) -> ServiceResult<ListProjectsResponse> {
        self.0.unary("/project.Service/ListProjects", request).await
    }
}

// ── Edge cluster ────────────────────────────────────────────────────────────

pub struct GrpcEdgeClusterClientFactory {
    endpoint: BackendEndpoint,
}

impl GrpcEdgeClusterClientFactory {
    #[must_use]
    pub fn new(endpoint: BackendEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl EdgeClusterClientFactory for GrpcEdgeClusterClientFactory {
    async fn create_client(&self) -> ServiceResult<Client<dyn EdgeClusterService>> {
        let (transport, connection) = self.endpoint.connect().await?;
        let service: Box<dyn EdgeClusterService> = Box::new(GrpcEdgeClusterService(transport));
        Ok(Client::new(service, connection))
    }
}

struct GrpcEdgeClusterService(Transport);

#[async_trait]
impl EdgeClusterService for GrpcEdgeClusterService {
    async fn create_edge_cluster(
        &self,
        request: CreateEdgeClusterRequest,
    ) -> ServiceResult<CreateEdgeClusterResponse> {
        self.0
            .unary("/edgecluster.Service/CreateEdgeCluster", request)
            .await
    }

    async fn read_edge_cluster(
        &self,
        request: ReadEdgeClusterRequest,
    ) -> ServiceResult<ReadEdgeClusterResponse> {
        self.0
            .unary("/edgecluster.Service/ReadEdgeCluster", request)
            .await
    }

    async fn update_edge_cluster(
        &self,
        request: UpdateEdgeClusterRequest,
    ) -> ServiceResult<UpdateEdgeClusterResponse> {
        self.0
            .unary("/edgecluster.Service/UpdateEdgeCluster", request)
            .await
    }

    async fn delete_edge_cluster(
        &self,
        request: DeleteEdgeClusterRequest,
    ) -> ServiceResult<DeleteEdgeClusterResponse> {
        self.0
            .unary("/edgecluster.Service/DeleteEdgeCluster", request)
            .await
    }

    async fn list_edge_clusters(
        &self,
        request: ListEdgeClustersRequest,
    ) -> ServiceResult<ListEdgeClustersResponse> {
        self.0
            .unary("/edgecluster.Service/ListEdgeClusters", request)
            .await
    }

    async fn list_edge_cluster_nodes(
        &self,
        request: ListEdgeClusterNodesRequest,
    ) -> ServiceResult<ListEdgeClusterNodesResponse> {
        self.0
            .unary("/edgecluster.Service/ListEdgeClusterNodes", request)
            .await
    }

    async fn list_edge_cluster_pods(
        &self,
        request: ListEdgeClusterPodsRequest,
    ) -> ServiceResult<ListEdgeClusterPodsResponse> {
        self.0
            .unary("/edgecluster.Service/ListEdgeClusterPods", request)
            .await
    }

    async fn list_edge_cluster_services(
        &self,
        request: ListEdgeClusterServicesRequest,
    ) -> ServiceResult<ListEdgeClusterServicesResponse> {
        self.0
            .unary("/edgecluster.Service/ListEdgeClusterServices", request)
            .await
    }
}
