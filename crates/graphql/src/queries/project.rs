//! Project entity, connection, and edge resolvers.

use std::sync::Arc;

use {
    async_graphql::{ID, Object, Result},
    edgecloud_common::Error,
    edgecloud_service_traits::{
        EdgeClusterClientFactory, ProjectClientFactory,
        edge_cluster::ListEdgeClustersRequest,
        project::{ListProjectsResponse, Project, ReadProjectRequest},
    },
};

use crate::{
    context::RequestContext,
    error::{ensure_no_error, gql_err},
    queries::edge_cluster::{
        EdgeClusterResolver, EdgeClusterTypeConnectionResolver, list_edge_clusters,
    },
    registry::ResolverRegistry,
    relay::{ConnectionArgs, PageInfo, SortingOptionPair},
};

pub struct ProjectResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    edge_clusters: Arc<dyn EdgeClusterClientFactory>,
    id: String,
    detail: Project,
}

impl ProjectResolver {
    /// Wrap `detail` when the caller already holds it, otherwise read the
    /// project from the backend.
    pub(crate) async fn load(
        ctx: &RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: &dyn ProjectClientFactory,
        edge_clusters: Arc<dyn EdgeClusterClientFactory>,
        project_id: &str,
        detail: Option<Project>,
    ) -> edgecloud_common::Result<Self> {
        let detail = match detail {
            Some(detail) => detail,
            None => {
                let client = ctx.call("project.connect", factory.create_client()).await?;
                let response = ctx
                    .call(
                        "ReadProject",
                        client.read_project(ReadProjectRequest {
                            project_id: project_id.to_string(),
                        }),
                    )
                    .await;
                client.close();
                ensure_no_error("ReadProject", response?)?
                    .project
                    .ok_or_else(|| Error::unknown("ReadProject returned no project"))?
            },
        };

        Ok(Self {
            ctx: ctx.clone(),
            registry,
            edge_clusters,
            id: project_id.to_string(),
            detail,
        })
    }
}

#[Object(name = "Project")]
impl ProjectResolver {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.detail.name
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

    /// Edge clusters owned by this project.
    async fn edge_clusters(
        &self,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(name = "edgeClusterIDs")] edge_cluster_ids: Option<Vec<ID>>,
        sorting_options: Option<Vec<SortingOptionPair>>,
    ) -> Result<EdgeClusterTypeConnectionResolver> {
        let args = ConnectionArgs::new(first, after, last, before, sorting_options);
        let request = ListEdgeClustersRequest {
            pagination: Some(args.pagination()),
            sorting_options: args.sorting_options(),
            edge_cluster_ids: edge_cluster_ids
                .unwrap_or_default()
                .into_iter()
                .map(|id| id.0)
                .collect(),
            project_ids: vec![self.id.clone()],
        };

        let page = list_edge_clusters(&self.ctx, self.edge_clusters.as_ref(), request)
            .await
            .map_err(gql_err)?;
        self.registry
            .new_edge_cluster_type_connection_resolver(&self.ctx, page)
            .map_err(gql_err)
    }
}

// ── Connection ──────────────────────────────────────────────────────────────

pub struct ProjectTypeConnectionResolver {
    page_info: PageInfo,
    edges: Vec<ProjectTypeEdgeResolver>,
    total_count: i64,
}

impl ProjectTypeConnectionResolver {
    pub(crate) fn new(
        ctx: &RequestContext,
        registry: &dyn ResolverRegistry,
        page: ListProjectsResponse,
    ) -> edgecloud_common::Result<Self> {
        // Page bounds come from every item, including those dropped below.
        let page_info = PageInfo::from_cursors(
            page.projects.iter().map(|item| item.cursor.as_str()),
            page.has_previous_page,
            page.has_next_page,
        );
        let edges = page
            .projects
            .into_iter()
            .filter_map(|item| {
                item.project
                    .map(|project| (item.project_id, project, item.cursor))
            })
            .map(|(id, project, cursor)| {
                registry.new_project_type_edge_resolver(ctx, &id, project, &cursor)
            })
            .collect::<edgecloud_common::Result<Vec<_>>>()?;

        Ok(Self {
            page_info,
            edges,
            total_count: page.total_count,
        })
    }
}

#[Object(name = "ProjectTypeConnection")]
impl ProjectTypeConnectionResolver {
    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    async fn edges(&self) -> &[ProjectTypeEdgeResolver] {
        &self.edges
    }

    async fn total_count(&self) -> i64 {
        self.total_count
    }
}

// ── Edge ────────────────────────────────────────────────────────────────────

pub struct ProjectTypeEdgeResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    project_id: String,
    detail: Project,
    cursor: String,
}

impl ProjectTypeEdgeResolver {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        project_id: &str,
        detail: Project,
        cursor: &str,
    ) -> Self {
        Self {
            ctx,
            registry,
            project_id: project_id.to_string(),
            detail,
            cursor: cursor.to_string(),
        }
    }
}

#[Object(name = "ProjectTypeEdge")]
impl ProjectTypeEdgeResolver {
    async fn node(&self) -> Result<ProjectResolver> {
        self.registry
            .new_project_resolver(&self.ctx, &self.project_id, Some(self.detail.clone()))
            .await
            .map_err(gql_err)
    }

    async fn cursor(&self) -> &str {
        &self.cursor
    }
}
