//! The resolver registry: sole construction point of every resolver.
//!
//! Resolvers never build one another directly. A project resolver that needs
//! an edge-cluster connection asks the registry for it, so resolver modules
//! only depend on [`ResolverRegistry`], and [`Registry`] is the one place
//! that knows every constructor and holds the backend client factories.

use std::sync::{Arc, Weak};

use {
    async_trait::async_trait,
    edgecloud_common::{Error, Result, require_non_blank},
    edgecloud_service_traits::{
        Backends,
        edge_cluster::{
            EdgeClusterNode as ProtoNode, EdgeClusterPod as ProtoPod,
            EdgeClusterServiceObject as ProtoService, ListEdgeClustersResponse,
            ProvisionDetail as ProtoProvisionDetail,
        },
        project::{ListProjectsResponse, Project},
        tenant::{ListTenantsResponse, Tenant},
    },
};

use crate::{
    context::RequestContext,
    mutations::{
        edge_cluster::{
            CreateEdgeCluster, CreateEdgeClusterPayload, DeleteEdgeCluster,
            DeleteEdgeClusterPayload, UpdateEdgeCluster, UpdateEdgeClusterPayload,
        },
        project::{
            CreateProject, CreateProjectPayload, DeleteProject, DeleteProjectPayload,
            UpdateProject, UpdateProjectPayload,
        },
        tenant::{
            CreateTenant, CreateTenantPayload, DeleteTenant, DeleteTenantPayload, UpdateTenant,
            UpdateTenantPayload,
        },
    },
    queries::{
        cluster_objects::{ClusterService, EdgeClusterNode, EdgeClusterPod, ProvisionDetail},
        edge_cluster::{
            EdgeClusterDetail, EdgeClusterResolver, EdgeClusterTypeConnectionResolver,
            EdgeClusterTypeEdgeResolver,
        },
        project::{ProjectResolver, ProjectTypeConnectionResolver, ProjectTypeEdgeResolver},
        tenant::{TenantResolver, TenantTypeConnectionResolver, TenantTypeEdgeResolver},
        user::UserResolver,
    },
};

/// One constructor per resolver kind.
///
/// Structural arguments are validated before anything is allocated: a blank
/// identifier or cursor fails with [`Error::Argument`] and no backend call is
/// made. Entity constructors taking `detail: None` perform exactly one read
/// call; with `Some(detail)` they perform none.
#[async_trait]
pub trait ResolverRegistry: Send + Sync {
    fn new_user_resolver(&self, ctx: &RequestContext, user_id: &str) -> Result<UserResolver>;

    // ── Tenant ──────────────────────────────────────────────────────────────

    async fn new_tenant_resolver(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        detail: Option<Tenant>,
    ) -> Result<TenantResolver>;

    fn new_tenant_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListTenantsResponse,
    ) -> Result<TenantTypeConnectionResolver>;

    fn new_tenant_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<TenantTypeEdgeResolver>;

    fn new_create_tenant(&self, ctx: &RequestContext) -> Result<CreateTenant>;

    fn new_update_tenant(&self, ctx: &RequestContext) -> Result<UpdateTenant>;

    fn new_delete_tenant(&self, ctx: &RequestContext) -> Result<DeleteTenant>;

    fn new_create_tenant_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<CreateTenantPayload>;

    fn new_update_tenant_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<UpdateTenantPayload>;

    fn new_delete_tenant_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
    ) -> Result<DeleteTenantPayload>;

    // ── Project ─────────────────────────────────────────────────────────────

    async fn new_project_resolver(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        detail: Option<Project>,
    ) -> Result<ProjectResolver>;

    fn new_project_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListProjectsResponse,
    ) -> Result<ProjectTypeConnectionResolver>;

    fn new_project_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<ProjectTypeEdgeResolver>;

    fn new_create_project(&self, ctx: &RequestContext) -> Result<CreateProject>;

    fn new_update_project(&self, ctx: &RequestContext) -> Result<UpdateProject>;

    fn new_delete_project(&self, ctx: &RequestContext) -> Result<DeleteProject>;

    fn new_create_project_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<CreateProjectPayload>;

    fn new_update_project_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<UpdateProjectPayload>;

    fn new_delete_project_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
    ) -> Result<DeleteProjectPayload>;

    // ── Edge cluster ────────────────────────────────────────────────────────

    async fn new_edge_cluster_resolver(
        &self,
        ctx: &RequestContext,
        edge_cluster_id: &str,
        detail: Option<EdgeClusterDetail>,
    ) -> Result<EdgeClusterResolver>;

    fn new_edge_cluster_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListEdgeClustersResponse,
    ) -> Result<EdgeClusterTypeConnectionResolver>;

    fn new_edge_cluster_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<EdgeClusterTypeEdgeResolver>;

    fn new_provision_detail_resolver(
        &self,
        ctx: &RequestContext,
        detail: ProtoProvisionDetail,
    ) -> Result<ProvisionDetail>;

    fn new_edge_cluster_node_resolver(
        &self,
        ctx: &RequestContext,
        node: ProtoNode,
    ) -> Result<EdgeClusterNode>;

    fn new_edge_cluster_pod_resolver(
        &self,
        ctx: &RequestContext,
        pod: ProtoPod,
    ) -> Result<EdgeClusterPod>;

    fn new_edge_cluster_service_resolver(
        &self,
        ctx: &RequestContext,
        service: ProtoService,
    ) -> Result<ClusterService>;

    fn new_create_edge_cluster(&self, ctx: &RequestContext) -> Result<CreateEdgeCluster>;

    fn new_update_edge_cluster(&self, ctx: &RequestContext) -> Result<UpdateEdgeCluster>;

    fn new_delete_edge_cluster(&self, ctx: &RequestContext) -> Result<DeleteEdgeCluster>;

    fn new_create_edge_cluster_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<CreateEdgeClusterPayload>;

    fn new_update_edge_cluster_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<UpdateEdgeClusterPayload>;

    fn new_delete_edge_cluster_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
    ) -> Result<DeleteEdgeClusterPayload>;
}

// ── Composition root ────────────────────────────────────────────────────────

/// The concrete registry. Resolvers receive it as `Arc<dyn ResolverRegistry>`.
pub struct Registry {
    this: Weak<Registry>,
    backends: Backends,
}

impl Registry {
    #[must_use]
    pub fn new(backends: Backends) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            backends,
        })
    }

    fn handle(&self) -> Result<Arc<dyn ResolverRegistry>> {
        let this: Arc<dyn ResolverRegistry> = self
            .this
            .upgrade()
            .ok_or_else(|| Error::unknown("resolver registry is no longer alive"))?;
        Ok(this)
    }
}

#[async_trait]
impl ResolverRegistry for Registry {
    fn new_user_resolver(&self, ctx: &RequestContext, user_id: &str) -> Result<UserResolver> {
        require_non_blank("userID", user_id)?;
        Ok(UserResolver::new(
            ctx.clone(),
            self.handle()?,
            self.backends.clone(),
            user_id,
        ))
    }

    // ── Tenant ──────────────────────────────────────────────────────────────

    async fn new_tenant_resolver(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        detail: Option<Tenant>,
    ) -> Result<TenantResolver> {
        require_non_blank("tenantID", tenant_id)?;
        TenantResolver::load(ctx, self.backends.tenant.as_ref(), tenant_id, detail).await
    }

    fn new_tenant_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListTenantsResponse,
    ) -> Result<TenantTypeConnectionResolver> {
        TenantTypeConnectionResolver::new(ctx, self, page)
    }

    fn new_tenant_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<TenantTypeEdgeResolver> {
        require_non_blank("tenantID", tenant_id)?;
        require_non_blank("cursor", cursor)?;
        Ok(TenantTypeEdgeResolver::new(
            ctx.clone(),
            self.handle()?,
            tenant_id,
            detail,
            cursor,
        ))
    }

    fn new_create_tenant(&self, ctx: &RequestContext) -> Result<CreateTenant> {
        Ok(CreateTenant::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.tenant),
        ))
    }

    fn new_update_tenant(&self, ctx: &RequestContext) -> Result<UpdateTenant> {
        Ok(UpdateTenant::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.tenant),
        ))
    }

    fn new_delete_tenant(&self, ctx: &RequestContext) -> Result<DeleteTenant> {
        Ok(DeleteTenant::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.tenant),
        ))
    }

    fn new_create_tenant_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<CreateTenantPayload> {
        let tenant = self.new_tenant_type_edge_resolver(ctx, tenant_id, detail, cursor)?;
        Ok(CreateTenantPayload::new(client_mutation_id, tenant))
    }

    fn new_update_tenant_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Result<UpdateTenantPayload> {
        let tenant = self.new_tenant_type_edge_resolver(ctx, tenant_id, detail, cursor)?;
        Ok(UpdateTenantPayload::new(client_mutation_id, tenant))
    }

    fn new_delete_tenant_payload(
        &self,
        _ctx: &RequestContext,
        client_mutation_id: Option<String>,
        tenant_id: &str,
    ) -> Result<DeleteTenantPayload> {
        require_non_blank("tenantID", tenant_id)?;
        Ok(DeleteTenantPayload::new(client_mutation_id, tenant_id))
    }

    // ── Project ─────────────────────────────────────────────────────────────

    async fn new_project_resolver(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        detail: Option<Project>,
    ) -> Result<ProjectResolver> {
        require_non_blank("projectID", project_id)?;
        ProjectResolver::load(
            ctx,
            self.handle()?,
            self.backends.project.as_ref(),
            Arc::clone(&self.backends.edge_cluster),
            project_id,
            detail,
        )
        .await
    }

    fn new_project_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListProjectsResponse,
    ) -> Result<ProjectTypeConnectionResolver> {
        ProjectTypeConnectionResolver::new(ctx, self, page)
    }

    fn new_project_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<ProjectTypeEdgeResolver> {
        require_non_blank("projectID", project_id)?;
        require_non_blank("cursor", cursor)?;
        Ok(ProjectTypeEdgeResolver::new(
            ctx.clone(),
            self.handle()?,
            project_id,
            detail,
            cursor,
        ))
    }

    fn new_create_project(&self, ctx: &RequestContext) -> Result<CreateProject> {
        Ok(CreateProject::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.project),
        ))
    }

    fn new_update_project(&self, ctx: &RequestContext) -> Result<UpdateProject> {
        Ok(UpdateProject::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.project),
        ))
    }

    fn new_delete_project(&self, ctx: &RequestContext) -> Result<DeleteProject> {
        Ok(DeleteProject::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.project),
        ))
    }

    fn new_create_project_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<CreateProjectPayload> {
        let project = self.new_project_type_edge_resolver(ctx, project_id, detail, cursor)?;
        Ok(CreateProjectPayload::new(client_mutation_id, project))
    }

    fn new_update_project_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Result<UpdateProjectPayload> {
        let project = self.new_project_type_edge_resolver(ctx, project_id, detail, cursor)?;
        Ok(UpdateProjectPayload::new(client_mutation_id, project))
    }

    fn new_delete_project_payload(
        &self,
        _ctx: &RequestContext,
        client_mutation_id: Option<String>,
        project_id: &str,
    ) -> Result<DeleteProjectPayload> {
        require_non_blank("projectID", project_id)?;
        Ok(DeleteProjectPayload::new(client_mutation_id, project_id))
    }

    // ── Edge cluster ────────────────────────────────────────────────────────

    async fn new_edge_cluster_resolver(
        &self,
        ctx: &RequestContext,
        edge_cluster_id: &str,
        detail: Option<EdgeClusterDetail>,
    ) -> Result<EdgeClusterResolver> {
        require_non_blank("edgeClusterID", edge_cluster_id)?;
        EdgeClusterResolver::load(
            ctx,
            self.handle()?,
            Arc::clone(&self.backends.edge_cluster),
            edge_cluster_id,
            detail,
        )
        .await
    }

    fn new_edge_cluster_type_connection_resolver(
        &self,
        ctx: &RequestContext,
        page: ListEdgeClustersResponse,
    ) -> Result<EdgeClusterTypeConnectionResolver> {
        EdgeClusterTypeConnectionResolver::new(ctx, self, page)
    }

    fn new_edge_cluster_type_edge_resolver(
        &self,
        ctx: &RequestContext,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<EdgeClusterTypeEdgeResolver> {
        require_non_blank("edgeClusterID", edge_cluster_id)?;
        require_non_blank("cursor", cursor)?;
        Ok(EdgeClusterTypeEdgeResolver::new(
            ctx.clone(),
            self.handle()?,
            edge_cluster_id,
            detail,
            cursor,
        ))
    }

    fn new_provision_detail_resolver(
        &self,
        _ctx: &RequestContext,
        detail: ProtoProvisionDetail,
    ) -> Result<ProvisionDetail> {
        ProvisionDetail::try_from(detail)
    }

    fn new_edge_cluster_node_resolver(
        &self,
        _ctx: &RequestContext,
        node: ProtoNode,
    ) -> Result<EdgeClusterNode> {
        EdgeClusterNode::try_from(node)
    }

    fn new_edge_cluster_pod_resolver(
        &self,
        _ctx: &RequestContext,
        pod: ProtoPod,
    ) -> Result<EdgeClusterPod> {
        EdgeClusterPod::try_from(pod)
    }

    fn new_edge_cluster_service_resolver(
        &self,
        _ctx: &RequestContext,
        service: ProtoService,
    ) -> Result<ClusterService> {
        ClusterService::try_from(service)
    }

    fn new_create_edge_cluster(&self, ctx: &RequestContext) -> Result<CreateEdgeCluster> {
        Ok(CreateEdgeCluster::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.edge_cluster),
        ))
    }

    fn new_update_edge_cluster(&self, ctx: &RequestContext) -> Result<UpdateEdgeCluster> {
        Ok(UpdateEdgeCluster::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.edge_cluster),
        ))
    }

    fn new_delete_edge_cluster(&self, ctx: &RequestContext) -> Result<DeleteEdgeCluster> {
        Ok(DeleteEdgeCluster::new(
            ctx.clone(),
            self.handle()?,
            Arc::clone(&self.backends.edge_cluster),
        ))
    }

    fn new_create_edge_cluster_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<CreateEdgeClusterPayload> {
        let edge_cluster =
            self.new_edge_cluster_type_edge_resolver(ctx, edge_cluster_id, detail, cursor)?;
        Ok(CreateEdgeClusterPayload::new(client_mutation_id, edge_cluster))
    }

    fn new_update_edge_cluster_payload(
        &self,
        ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Result<UpdateEdgeClusterPayload> {
        let edge_cluster =
            self.new_edge_cluster_type_edge_resolver(ctx, edge_cluster_id, detail, cursor)?;
        Ok(UpdateEdgeClusterPayload::new(client_mutation_id, edge_cluster))
    }

    fn new_delete_edge_cluster_payload(
        &self,
        _ctx: &RequestContext,
        client_mutation_id: Option<String>,
        edge_cluster_id: &str,
    ) -> Result<DeleteEdgeClusterPayload> {
        require_non_blank("edgeClusterID", edge_cluster_id)?;
        Ok(DeleteEdgeClusterPayload::new(
            client_mutation_id,
            edge_cluster_id,
        ))
    }
}
