//! GraphQL mutation resolvers, one module per backend domain.
//!
//! Every root field follows the same shape: ask the registry for the
//! mutation object, run it, and hand back its payload. Each mutation
//! performs exactly one backend call.

pub mod edge_cluster;
pub mod project;
pub mod tenant;

use async_graphql::{Context, Object, Result};

use crate::{
    context::scope,
    error::gql_err,
    mutations::{
        edge_cluster::{
            CreateEdgeClusterInput, CreateEdgeClusterPayload, DeleteEdgeClusterInput,
            DeleteEdgeClusterPayload, UpdateEdgeClusterInput, UpdateEdgeClusterPayload,
        },
        project::{
            CreateProjectInput, CreateProjectPayload, DeleteProjectInput, DeleteProjectPayload,
            UpdateProjectInput, UpdateProjectPayload,
        },
        tenant::{
            CreateTenantInput, CreateTenantPayload, DeleteTenantInput, DeleteTenantPayload,
            UpdateTenantInput, UpdateTenantPayload,
        },
    },
};

/// Root mutation type.
#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // ── Tenant ──────────────────────────────────────────────────────────────

    async fn create_tenant(
        &self,
        ctx: &Context<'_>,
        input: CreateTenantInput,
    ) -> Result<CreateTenantPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_create_tenant(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn update_tenant(
        &self,
        ctx: &Context<'_>,
        input: UpdateTenantInput,
    ) -> Result<UpdateTenantPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_update_tenant(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn delete_tenant(
        &self,
        ctx: &Context<'_>,
        input: DeleteTenantInput,
    ) -> Result<DeleteTenantPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_delete_tenant(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    // ── Project ─────────────────────────────────────────────────────────────

    async fn create_project(
        &self,
        ctx: &Context<'_>,
        input: CreateProjectInput,
    ) -> Result<CreateProjectPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_create_project(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn update_project(
        &self,
        ctx: &Context<'_>,
        input: UpdateProjectInput,
    ) -> Result<UpdateProjectPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_update_project(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn delete_project(
        &self,
        ctx: &Context<'_>,
        input: DeleteProjectInput,
    ) -> Result<DeleteProjectPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_delete_project(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    // ── Edge cluster ────────────────────────────────────────────────────────

    async fn create_edge_cluster(
        &self,
        ctx: &Context<'_>,
        input: CreateEdgeClusterInput,
    ) -> Result<CreateEdgeClusterPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_create_edge_cluster(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn update_edge_cluster(
        &self,
        ctx: &Context<'_>,
        input: UpdateEdgeClusterInput,
    ) -> Result<UpdateEdgeClusterPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_update_edge_cluster(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }

    async fn delete_edge_cluster(
        &self,
        ctx: &Context<'_>,
        input: DeleteEdgeClusterInput,
    ) -> Result<DeleteEdgeClusterPayload> {
        let (registry, request) = scope(ctx)?;
        let mutation = registry.new_delete_edge_cluster(&request).map_err(gql_err)?;
        mutation.mutate_and_get_payload(input).await.map_err(gql_err)
    }
}
