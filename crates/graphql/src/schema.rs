//! Schema construction and type alias.

use std::{sync::Arc, time::Duration};

use async_graphql::{EmptySubscription, Schema};

use crate::{
    context::GqlContext, mutations::MutationRoot, queries::QueryRoot, registry::ResolverRegistry,
};

/// The full edge-cloud GraphQL schema type.
pub type EdgeCloudSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema around a resolver registry.
///
/// `default_user_id` and `request_timeout` only apply to requests executed
/// without a [`RequestContext`](crate::context::RequestContext) attached;
/// the HTTP layer always attaches one.
pub fn build_schema(
    registry: Arc<dyn ResolverRegistry>,
    default_user_id: impl Into<String>,
    request_timeout: Option<Duration>,
) -> EdgeCloudSchema {
    let ctx = Arc::new(GqlContext {
        registry,
        default_user_id: default_user_id.into(),
        request_timeout,
    });

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ctx)
        .finish()
}

/// SDL of the schema, for `edgecloud schema`.
#[must_use]
pub fn schema_sdl(schema: &EdgeCloudSchema) -> String {
    schema.sdl()
}
