//! Tenant entity, connection, and edge resolvers.

use std::sync::Arc;

use {
    async_graphql::{ID, Object, Result},
    edgecloud_common::Error,
    edgecloud_service_traits::{
        TenantClientFactory,
        tenant::{ListTenantsResponse, ReadTenantRequest, Tenant},
    },
};

use crate::{
    context::RequestContext,
    error::{ensure_no_error, gql_err},
    registry::ResolverRegistry,
    relay::PageInfo,
};

pub struct TenantResolver {
    id: String,
    detail: Tenant,
}

impl TenantResolver {
    /// Wrap `detail` when the caller already holds it, otherwise read the
    /// tenant from the backend.
    pub(crate) async fn load(
        ctx: &RequestContext,
        factory: &dyn TenantClientFactory,
        tenant_id: &str,
        detail: Option<Tenant>,
    ) -> edgecloud_common::Result<Self> {
        let detail = match detail {
            Some(detail) => detail,
            None => {
                let client = ctx.call("tenant.connect", factory.create_client()).await?;
                let response = ctx
                    .call(
                        "ReadTenant",
                        client.read_tenant(ReadTenantRequest {
                            tenant_id: tenant_id.to_string(),
                        }),
                    )
                    .await;
                client.close();
                ensure_no_error("ReadTenant", response?)?
                    .tenant
                    .ok_or_else(|| Error::unknown("ReadTenant returned no tenant"))?
            },
        };

        Ok(Self {
            id: tenant_id.to_string(),
            detail,
        })
    }
}

#[Object(name = "Tenant")]
impl TenantResolver {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.detail.name
    }
}

// ── Connection ──────────────────────────────────────────────────────────────

pub struct TenantTypeConnectionResolver {
    page_info: PageInfo,
    edges: Vec<TenantTypeEdgeResolver>,
    total_count: i64,
}

impl TenantTypeConnectionResolver {
    pub(crate) fn new(
        ctx: &RequestContext,
        registry: &dyn ResolverRegistry,
        page: ListTenantsResponse,
    ) -> edgecloud_common::Result<Self> {
        // Page bounds come from every item, including those dropped below.
        let page_info = PageInfo::from_cursors(
            page.tenants.iter().map(|item| item.cursor.as_str()),
            page.has_previous_page,
            page.has_next_page,
        );
        let edges = page
            .tenants
            .into_iter()
            .filter_map(|item| item.tenant.map(|tenant| (item.tenant_id, tenant, item.cursor)))
            .map(|(id, tenant, cursor)| {
                registry.new_tenant_type_edge_resolver(ctx, &id, tenant, &cursor)
            })
            .collect::<edgecloud_common::Result<Vec<_>>>()?;

        Ok(Self {
            page_info,
            edges,
            total_count: page.total_count,
        })
    }
}

#[Object(name = "TenantTypeConnection")]
impl TenantTypeConnectionResolver {
    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    async fn edges(&self) -> &[TenantTypeEdgeResolver] {
        &self.edges
    }

    /// Size of the whole matched set, not of this page.
    async fn total_count(&self) -> i64 {
        self.total_count
    }
}

// ── Edge ────────────────────────────────────────────────────────────────────

pub struct TenantTypeEdgeResolver {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    tenant_id: String,
    detail: Tenant,
    cursor: String,
}

impl TenantTypeEdgeResolver {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        tenant_id: &str,
        detail: Tenant,
        cursor: &str,
    ) -> Self {
        Self {
            ctx,
            registry,
            tenant_id: tenant_id.to_string(),
            detail,
            cursor: cursor.to_string(),
        }
    }
}

#[Object(name = "TenantTypeEdge")]
impl TenantTypeEdgeResolver {
    async fn node(&self) -> Result<TenantResolver> {
        self.registry
            .new_tenant_resolver(&self.ctx, &self.tenant_id, Some(self.detail.clone()))
            .await
            .map_err(gql_err)
    }

    async fn cursor(&self) -> &str {
        &self.cursor
    }
}
