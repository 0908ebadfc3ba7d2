//! GraphQL query resolvers, one module per backend domain.

pub mod cluster_objects;
pub mod edge_cluster;
pub mod project;
pub mod tenant;
pub mod user;

use async_graphql::{Context, Object, Result};

use crate::{context::scope, error::gql_err, queries::user::UserResolver};

// ── Root ────────────────────────────────────────────────────────────────────

/// Root query type. Everything hangs off the calling user.
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn user(&self, ctx: &Context<'_>) -> Result<UserResolver> {
        let (registry, request) = scope(ctx)?;
        registry
            .new_user_resolver(&request, &request.user_id)
            .map_err(gql_err)
    }
}
