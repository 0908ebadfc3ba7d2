//! GraphQL façade over the tenant, project, and edge-cluster backends.
//!
//! Every resolver is built by the [`registry::ResolverRegistry`]; resolver
//! modules never construct one another. The gateway crate owns the HTTP
//! handlers and attaches a [`context::RequestContext`] to each request. This
//! crate only defines the schema, the resolvers, and the registry.

pub mod context;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod registry;
pub mod relay;
pub mod schema;

pub use {
    context::{GqlContext, RequestContext},
    registry::{Registry, ResolverRegistry},
    schema::{EdgeCloudSchema, build_schema, schema_sdl},
};
