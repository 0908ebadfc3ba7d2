//! The `User` root: entry point for every entity lookup and listing.

use std::sync::Arc;

use {
    async_graphql::{ID, Object, Result},
    edgecloud_common::Result as CoreResult,
    edgecloud_service_traits::{
        Backends,
        edge_cluster::ListEdgeClustersRequest,
        project::{ListProjectsRequest, ListProjectsResponse},
        tenant::{ListTenantsRequest, ListTenantsResponse},
    },
};

use crate::{
    context::RequestContext,
    error::{ensure_no_error, gql_err},
    queries::{
        edge_cluster::{
            EdgeClusterResolver, EdgeClusterTypeConnectionResolver, list_edge_clusters,
        },
        project::{ProjectResolver, ProjectTypeConnectionResolver},
        tenant::{TenantResolver, TenantTypeConnectionResolver},
    },
    registry::ResolverRegistry,
    relay::{ConnectionArgs, SortingOptionPair},
};

fn ids(values: Option<Vec<ID>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|id| id.0)
        .collect()
}

pub struct UserResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    backends: Backends,
    id: String,
}

impl UserResolver {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        backends: Backends,
        user_id: &str,
    ) -> Self {
        Self {
            ctx,
            registry,
            backends,
            id: user_id.to_string(),
        }
    }

    async fn list_tenants(&self, request: ListTenantsRequest) -> CoreResult<ListTenantsResponse> {
        let client = self
            .ctx
            .call("tenant.connect", self.backends.tenant.create_client())
            .await?;
        let response = self
            .ctx
            .call("ListTenants", client.list_tenants(request))
            .await;
        client.close();
        ensure_no_error("ListTenants", response?)
    }

    async fn list_projects(
        &self,
        request: ListProjectsRequest,
    ) -> CoreResult<ListProjectsResponse> {
        let client = self
            .ctx
            .call("project.connect", self.backends.project.create_client())
            .await?;
        let response = self
            .ctx
            .call("ListProjects", client.list_projects(request))
            .await;
        client.close();
        ensure_no_error("ListProjects", response?)
    }
}

#[Object(name = "User")]
impl UserResolver {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn tenant(&self, #[graphql(name = "tenantID")] tenant_id: ID) -> Result<TenantResolver> {
        self.registry
            .new_tenant_resolver(&self.ctx, &tenant_id, None)
            .await
            .map_err(gql_err)
    }

    async fn tenants(
        &self,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(name = "tenantIDs")] tenant_ids: Option<Vec<ID>>,
        sorting_options: Option<Vec<SortingOptionPair>>,
    ) -> Result<TenantTypeConnectionResolver> {
        let args = ConnectionArgs::new(first, after, last, before, sorting_options);
        let page = self
            .list_tenants(ListTenantsRequest {
                pagination: Some(args.pagination()),
                sorting_options: args.sorting_options(),
                tenant_ids: ids(tenant_ids),
            })
            .await
            .map_err(gql_err)?;
        self.registry
            .new_tenant_type_connection_resolver(&self.ctx, page)
            .map_err(gql_err)
    }

    async fn project(
        &self,
        #[graphql(name = "projectID")] project_id: ID,
    ) -> Result<ProjectResolver> {
        self.registry
            .new_project_resolver(&self.ctx, &project_id, None)
            .await
            .map_err(gql_err)
    }

    async fn projects(
        &self,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(name = "projectIDs")] project_ids: Option<Vec<ID>>,
        sorting_options: Option<Vec<SortingOptionPair>>,
    ) -> Result<ProjectTypeConnectionResolver> {
        let args = ConnectionArgs::new(first, after, last, before, sorting_options);
        let page = self
            .list_projects(ListProjectsRequest {
                pagination: Some(args.pagination()),
                sorting_options: args.sorting_options(),
                project_ids: ids(project_ids),
            })
            .await
            .map_err(gql_err)?;
        self.registry
            .new_project_type_connection_resolver(&self.ctx, page)
            .map_err(gql_err)
    }

    async fn edge_cluster(
        &self,
        #[graphql(name = "edgeClusterID")] edge_cluster_id: ID,
    ) -> Result<EdgeClusterResolver> {
        self.registry
            .new_edge_cluster_resolver(&self.ctx, &edge_cluster_id, None)
            .await
            .map_err(gql_err)
    }

    #[allow(clippy::too_many_arguments)]
    async fn edge_clusters(
        &self,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(name = "edgeClusterIDs")] edge_cluster_ids: Option<Vec<ID>>,
        #[graphql(name = "projectIDs")] project_ids: Option<Vec<ID>>,
        sorting_options: Option<Vec<SortingOptionPair>>,
    ) -> Result<EdgeClusterTypeConnectionResolver> {
        let args = ConnectionArgs::new(first, after, last, before, sorting_options);
        let request = ListEdgeClustersRequest {
            pagination: Some(args.pagination()),
            sorting_options: args.sorting_options(),
            edge_cluster_ids: ids(edge_cluster_ids),
            project_ids: ids(project_ids),
        };
        let page = list_edge_clusters(&self.ctx, self.backends.edge_cluster.as_ref(), request)
            .await
            .map_err(gql_err)?;
        self.registry
            .new_edge_cluster_type_connection_resolver(&self.ctx, page)
            .map_err(gql_err)
    }
}
