//! Edge-cluster entity, connection, and edge resolvers.
//!
//! Besides its own fields an edge cluster exposes its owning project (one
//! extra read, only when selected) and live views of the cluster's nodes,
//! pods, and services, each fetched with one list call per field.

use std::sync::Arc;

use {
    async_graphql::{Enum, ID, Object, Result},
    edgecloud_common::{Error, Result as CoreResult},
    edgecloud_service_traits::{
        EdgeClusterClientFactory,
        edge_cluster::{
            ClusterType, EdgeCluster, ListEdgeClusterNodesRequest, ListEdgeClusterPodsRequest,
            ListEdgeClusterServicesRequest, ListEdgeClustersRequest, ListEdgeClustersResponse,
            ProvisionDetail as ProtoProvisionDetail, ReadEdgeClusterRequest,
        },
    },
};

use crate::{
    context::RequestContext,
    error::{ensure_no_error, gql_err},
    queries::{
        cluster_objects::{ClusterService, EdgeClusterNode, EdgeClusterPod, ProvisionDetail},
        project::ProjectResolver,
    },
    registry::ResolverRegistry,
    relay::PageInfo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum EdgeClusterType {
    #[graphql(name = "K3S")]
    K3s,
}

impl From<EdgeClusterType> for ClusterType {
    fn from(value: EdgeClusterType) -> Self {
        match value {
            EdgeClusterType::K3s => Self::K3s,
        }
    }
}

impl TryFrom<i32> for EdgeClusterType {
    type Error = Error;

    fn try_from(value: i32) -> CoreResult<Self> {
        match ClusterType::try_from(value) {
            Ok(ClusterType::K3s) => Ok(Self::K3s),
            Err(_) => Err(Error::unknown(format!(
                "cluster type is not supported: {value}"
            ))),
        }
    }
}

/// Everything the backend returns about one edge cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeClusterDetail {
    pub edge_cluster: EdgeCluster,
    pub provision_detail: Option<ProtoProvisionDetail>,
}

/// Run one `ListEdgeClusters` call on a fresh client.
pub(crate) async fn list_edge_clusters(
    ctx: &RequestContext,
    factory: &dyn EdgeClusterClientFactory,
    request: ListEdgeClustersRequest,
) -> CoreResult<ListEdgeClustersResponse> {
    let client = ctx
        .call("edgecluster.connect", factory.create_client())
        .await?;
    let response = ctx
        .call("ListEdgeClusters", client.list_edge_clusters(request))
        .await;
    client.close();
    ensure_no_error("ListEdgeClusters", response?)
}

pub struct EdgeClusterResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn EdgeClusterClientFactory>,
    id: String,
    detail: EdgeClusterDetail,
}

impl EdgeClusterResolver {
    /// Wrap `detail` when the caller already holds it, otherwise read the
    /// edge cluster from the backend.
    pub(crate) async fn load(
        ctx: &RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn EdgeClusterClientFactory>,
        edge_cluster_id: &str,
        detail: Option<EdgeClusterDetail>,
    ) -> CoreResult<Self> {
        let detail = match detail {
            Some(detail) => detail,
            None => {
                let client = ctx
                    .call("edgecluster.connect", factory.create_client())
                    .await?;
                let response = ctx
                    .call(
                        "ReadEdgeCluster",
                        client.read_edge_cluster(ReadEdgeClusterRequest {
                            edge_cluster_id: edge_cluster_id.to_string(),
                        }),
                    )
                    .await;
                client.close();
                let response = ensure_no_error("ReadEdgeCluster", response?)?;
                EdgeClusterDetail {
                    edge_cluster: response.edge_cluster.ok_or_else(|| {
                        Error::unknown("ReadEdgeCluster returned no edge cluster")
                    })?,
                    provision_detail: response.provision_detail,
                }
            },
        };

        Ok(Self {
            ctx: ctx.clone(),
            registry,
            factory,
            id: edge_cluster_id.to_string(),
            detail,
        })
    }
}

#[Object(name = "EdgeCluster")]
impl EdgeClusterResolver {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.detail.edge_cluster.name
    }

    async fn cluster_secret(&self) -> &str {
        &self.detail.edge_cluster.cluster_secret
    }

    async fn cluster_type(&self) -> Result<EdgeClusterType> {
        EdgeClusterType::try_from(self.detail.edge_cluster.cluster_type).map_err(gql_err)
    }

    /// The project that owns this edge cluster.
    async fn project(&self) -> Result<ProjectResolver> {
        self.registry
            .new_project_resolver(&self.ctx, &self.detail.edge_cluster.project_id, None)
            .await
            .map_err(gql_err)
    }

    /// Connection details, once the cluster has been provisioned.
    async fn provision_detail(&self) -> Result<Option<ProvisionDetail>> {
        self.detail
            .provision_detail
            .clone()
            .map(|detail| self.registry.new_provision_detail_resolver(&self.ctx, detail))
            .transpose()
            .map_err(gql_err)
    }

    async fn nodes(&self) -> Result<Vec<EdgeClusterNode>> {
        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await
            .map_err(gql_err)?;
        let response = self
            .ctx
            .call(
                "ListEdgeClusterNodes",
                client.list_edge_cluster_nodes(ListEdgeClusterNodesRequest {
                    edge_cluster_id: self.id.clone(),
                }),
            )
            .await;
        client.close();

        let response = response
            .and_then(|response| ensure_no_error("ListEdgeClusterNodes", response))
            .map_err(gql_err)?;
        response
            .nodes
            .into_iter()
            .map(|node| self.registry.new_edge_cluster_node_resolver(&self.ctx, node))
            .collect::<CoreResult<Vec<_>>>()
            .map_err(gql_err)
    }

    /// Pods of the cluster, optionally narrowed to one node and/or namespace.
    async fn pods(
        &self,
        node_name: Option<String>,
        namespace: Option<String>,
    ) -> Result<Vec<EdgeClusterPod>> {
        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await
            .map_err(gql_err)?;
        let response = self
            .ctx
            .call(
                "ListEdgeClusterPods",
                client.list_edge_cluster_pods(ListEdgeClusterPodsRequest {
                    edge_cluster_id: self.id.clone(),
                    namespace: namespace.unwrap_or_default(),
                    node_name: node_name.unwrap_or_default(),
                }),
            )
            .await;
        client.close();

        let response = response
            .and_then(|response| ensure_no_error("ListEdgeClusterPods", response))
            .map_err(gql_err)?;
        response
            .pods
            .into_iter()
            .map(|pod| self.registry.new_edge_cluster_pod_resolver(&self.ctx, pod))
            .collect::<CoreResult<Vec<_>>>()
            .map_err(gql_err)
    }

    async fn services(&self, namespace: Option<String>) -> Result<Vec<ClusterService>> {
        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await
            .map_err(gql_err)?;
        let response = self
            .ctx
            .call(
                "ListEdgeClusterServices",
                client.list_edge_cluster_services(ListEdgeClusterServicesRequest {
                    edge_cluster_id: self.id.clone(),
                    namespace: namespace.unwrap_or_default(),
                }),
            )
            .await;
        client.close();

        let response = response
            .and_then(|response| ensure_no_error("ListEdgeClusterServices", response))
            .map_err(gql_err)?;
        response
            .services
            .into_iter()
            .map(|service| {
                self.registry
                    .new_edge_cluster_service_resolver(&self.ctx, service)
            })
            .collect::<CoreResult<Vec<_>>>()
            .map_err(gql_err)
    }
}

// ── Connection ──────────────────────────────────────────────────────────────

pub struct EdgeClusterTypeConnectionResolver {
    page_info: PageInfo,
    edges: Vec<EdgeClusterTypeEdgeResolver>,
    total_count: i64,
}

impl EdgeClusterTypeConnectionResolver {
    pub(crate) fn new(
        ctx: &RequestContext,
        registry: &dyn ResolverRegistry,
        page: ListEdgeClustersResponse,
    ) -> CoreResult<Self> {
        // Page bounds come from every item, including those dropped below.
        let page_info = PageInfo::from_cursors(
            page.edge_clusters.iter().map(|item| item.cursor.as_str()),
            page.has_previous_page,
            page.has_next_page,
        );
        let edges = page
            .edge_clusters
            .into_iter()
            .filter_map(|item| {
                let detail = EdgeClusterDetail {
                    edge_cluster: item.edge_cluster?,
                    provision_detail: item.provision_detail,
                };
                Some((item.edge_cluster_id, detail, item.cursor))
            })
            .map(|(id, detail, cursor)| {
                registry.new_edge_cluster_type_edge_resolver(ctx, &id, detail, &cursor)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            page_info,
            edges,
            total_count: page.total_count,
        })
    }
}

#[Object(name = "EdgeClusterTypeConnection")]
impl EdgeClusterTypeConnectionResolver {
    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    async fn edges(&self) -> &[EdgeClusterTypeEdgeResolver] {
        &self.edges
    }

    async fn total_count(&self) -> i64 {
        self.total_count
    }
}

// ── Edge ────────────────────────────────────────────────────────────────────

pub struct EdgeClusterTypeEdgeResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    edge_cluster_id: String,
    detail: EdgeClusterDetail,
    cursor: String,
}

impl EdgeClusterTypeEdgeResolver {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        edge_cluster_id: &str,
        detail: EdgeClusterDetail,
        cursor: &str,
    ) -> Self {
        Self {
            ctx,
            registry,
            edge_cluster_id: edge_cluster_id.to_string(),
            detail,
            cursor: cursor.to_string(),
        }
    }
}

#[Object(name = "EdgeClusterTypeEdge")]
impl EdgeClusterTypeEdgeResolver {
    async fn node(&self) -> Result<EdgeClusterResolver> {
        self.registry
            .new_edge_cluster_resolver(
                &self.ctx,
                &self.edge_cluster_id,
                Some(self.detail.clone()),
            )
            .await
            .map_err(gql_err)
    }

    async fn cursor(&self) -> &str {
        &self.cursor
    }
}
