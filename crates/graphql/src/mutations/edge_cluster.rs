//! Edge-cluster mutations and their payloads.

use std::sync::Arc;

use {
    async_graphql::{ID, InputObject, Object},
    edgecloud_common::{Error, Result, require_non_blank},
    edgecloud_service_traits::{
        EdgeClusterClientFactory,
        edge_cluster::{
            ClusterType, CreateEdgeClusterRequest, DeleteEdgeClusterRequest, EdgeCluster,
            UpdateEdgeClusterRequest,
        },
    },
};

use crate::{
    context::RequestContext,
    error::ensure_no_error,
    queries::edge_cluster::{EdgeClusterDetail, EdgeClusterType, EdgeClusterTypeEdgeResolver},
    registry::ResolverRegistry,
};

// ── Inputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, InputObject)]
pub struct CreateEdgeClusterInput {
    #[graphql(name = "projectID")]
    pub project_id: ID,
    pub name: String,
    pub cluster_secret: String,
    pub cluster_type: EdgeClusterType,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateEdgeClusterInput {
    #[graphql(name = "edgeClusterID")]
    pub edge_cluster_id: ID,
    #[graphql(name = "projectID")]
    pub project_id: ID,
    pub name: String,
    pub cluster_secret: String,
    pub cluster_type: EdgeClusterType,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct DeleteEdgeClusterInput {
    #[graphql(name = "edgeClusterID")]
    pub edge_cluster_id: ID,
    pub client_mutation_id: Option<String>,
}

/// Validate the fields shared by create and update, then build the message.
fn edge_cluster(
    project_id: String,
    name: String,
    cluster_secret: String,
    cluster_type: EdgeClusterType,
) -> Result<EdgeCluster> {
    require_non_blank("projectID", &project_id)?;
    require_non_blank("name", &name)?;
    require_non_blank("clusterSecret", &cluster_secret)?;

    Ok(EdgeCluster {
        project_id,
        name,
        cluster_secret,
        cluster_type: ClusterType::from(cluster_type) as i32,
    })
}

// ── Mutations ───────────────────────────────────────────────────────────────

pub struct CreateEdgeCluster {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn EdgeClusterClientFactory>,
}

impl CreateEdgeCluster {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn EdgeClusterClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: CreateEdgeClusterInput,
    ) -> Result<CreateEdgeClusterPayload> {
        let edge_cluster = edge_cluster(
            input.project_id.0,
            input.name,
            input.cluster_secret,
            input.cluster_type,
        )?;

        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "CreateEdgeCluster",
                client.create_edge_cluster(CreateEdgeClusterRequest {
                    edge_cluster: Some(edge_cluster),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("CreateEdgeCluster", response?)?;
        let detail = EdgeClusterDetail {
            edge_cluster: response
                .edge_cluster
                .ok_or_else(|| Error::unknown("CreateEdgeCluster returned no edge cluster"))?,
            provision_detail: response.provision_detail,
        };
        self.registry.new_create_edge_cluster_payload(
            &self.ctx,
            input.client_mutation_id,
            &response.edge_cluster_id,
            detail,
            &response.cursor,
        )
    }
}

pub struct UpdateEdgeCluster {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn EdgeClusterClientFactory>,
}

impl UpdateEdgeCluster {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn EdgeClusterClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: UpdateEdgeClusterInput,
    ) -> Result<UpdateEdgeClusterPayload> {
        let edge_cluster_id = input.edge_cluster_id.0;
        require_non_blank("edgeClusterID", &edge_cluster_id)?;
        let edge_cluster = edge_cluster(
            input.project_id.0,
            input.name,
            input.cluster_secret,
            input.cluster_type,
        )?;

        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "UpdateEdgeCluster",
                client.update_edge_cluster(UpdateEdgeClusterRequest {
                    edge_cluster_id: edge_cluster_id.clone(),
                    edge_cluster: Some(edge_cluster),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("UpdateEdgeCluster", response?)?;
        let detail = EdgeClusterDetail {
            edge_cluster: response
                .edge_cluster
                .ok_or_else(|| Error::unknown("UpdateEdgeCluster returned no edge cluster"))?,
            provision_detail: response.provision_detail,
        };
        self.registry.new_update_edge_cluster_payload(
            &self.ctx,
            input.client_mutation_id,
            &edge_cluster_id,
            detail,
            &response.cursor,
        )
    }
}

pub struct DeleteEdgeCluster {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn EdgeClusterClientFactory>,
}

impl DeleteEdgeCluster {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn EdgeClusterClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: DeleteEdgeClusterInput,
    ) -> Result<DeleteEdgeClusterPayload> {
        let edge_cluster_id = input.edge_cluster_id.0;
        require_non_blank("edgeClusterID", &edge_cluster_id)?;

        let client = self
            .ctx
            .call("edgecluster.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "DeleteEdgeCluster",
                client.delete_edge_cluster(DeleteEdgeClusterRequest {
                    edge_cluster_id: edge_cluster_id.clone(),
                }),
            )
            .await;
        client.close();

        ensure_no_error("DeleteEdgeCluster", response?)?;
        self.registry.new_delete_edge_cluster_payload(
            &self.ctx,
            input.client_mutation_id,
            &edge_cluster_id,
        )
    }
}

// ── Payloads ────────────────────────────────────────────────────────────────

pub struct CreateEdgeClusterPayload {
    client_mutation_id: Option<String>,
    edge_cluster: EdgeClusterTypeEdgeResolver,
}

impl CreateEdgeClusterPayload {
    pub(crate) fn new(
        client_mutation_id: Option<String>,
        edge_cluster: EdgeClusterTypeEdgeResolver,
    ) -> Self {
        Self {
            client_mutation_id,
            edge_cluster,
        }
    }
}

#[Object]
impl CreateEdgeClusterPayload {
    async fn edge_cluster(&self) -> &EdgeClusterTypeEdgeResolver {
        &self.edge_cluster
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct UpdateEdgeClusterPayload {
    client_mutation_id: Option<String>,
    edge_cluster: EdgeClusterTypeEdgeResolver,
}

impl UpdateEdgeClusterPayload {
    pub(crate) fn new(
        client_mutation_id: Option<String>,
        edge_cluster: EdgeClusterTypeEdgeResolver,
    ) -> Self {
        Self {
            client_mutation_id,
            edge_cluster,
        }
    }
}

#[Object]
impl UpdateEdgeClusterPayload {
    async fn edge_cluster(&self) -> &EdgeClusterTypeEdgeResolver {
        &self.edge_cluster
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct DeleteEdgeClusterPayload {
    client_mutation_id: Option<String>,
    deleted_edge_cluster_id: String,
}

impl DeleteEdgeClusterPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, edge_cluster_id: &str) -> Self {
        Self {
            client_mutation_id,
            deleted_edge_cluster_id: edge_cluster_id.to_string(),
        }
    }
}

#[Object]
impl DeleteEdgeClusterPayload {
    #[graphql(name = "deletedEdgeClusterID")]
    async fn deleted_edge_cluster_id(&self) -> ID {
        ID(self.deleted_edge_cluster_id.clone())
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}
