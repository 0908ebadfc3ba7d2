//! Tenant mutations and their payloads.

use std::sync::Arc;

use {
    async_graphql::{ID, InputObject, Object},
    edgecloud_common::{Error, Result, require_non_blank},
    edgecloud_service_traits::{
        TenantClientFactory,
        tenant::{CreateTenantRequest, DeleteTenantRequest, Tenant, UpdateTenantRequest},
    },
};

use crate::{
    context::RequestContext, error::ensure_no_error, queries::tenant::TenantTypeEdgeResolver,
    registry::ResolverRegistry,
};

// ── Inputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, InputObject)]
pub struct CreateTenantInput {
    pub name: String,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateTenantInput {
    #[graphql(name = "tenantID")]
    pub tenant_id: ID,
    pub name: String,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct DeleteTenantInput {
    #[graphql(name = "tenantID")]
    pub tenant_id: ID,
    pub client_mutation_id: Option<String>,
}

// ── Mutations ───────────────────────────────────────────────────────────────

pub struct CreateTenant {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn TenantClientFactory>,
}

impl CreateTenant {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn TenantClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: CreateTenantInput,
    ) -> Result<CreateTenantPayload> {
        require_non_blank("name", &input.name)?;

        let client = self
            .ctx
            .call("tenant.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "CreateTenant",
                client.create_tenant(CreateTenantRequest {
                    tenant: Some(Tenant { name: input.name }),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("CreateTenant", response?)?;
        let tenant = response
            .tenant
            .ok_or_else(|| Error::unknown("CreateTenant returned no tenant"))?;
        self.registry.new_create_tenant_payload(
            &self.ctx,
            input.client_mutation_id,
            &response.tenant_id,
            tenant,
            &response.cursor,
        )
    }
}

pub struct UpdateTenant {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn TenantClientFactory>,
}

impl UpdateTenant {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn TenantClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: UpdateTenantInput,
    ) -> Result<UpdateTenantPayload> {
        let tenant_id = input.tenant_id.0;
        require_non_blank("tenantID", &tenant_id)?;
        require_non_blank("name", &input.name)?;

        let client = self
            .ctx
            .call("tenant.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "UpdateTenant",
                client.update_tenant(UpdateTenantRequest {
                    tenant_id: tenant_id.clone(),
                    tenant: Some(Tenant { name: input.name }),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("UpdateTenant", response?)?;
        let tenant = response
            .tenant
            .ok_or_else(|| Error::unknown("UpdateTenant returned no tenant"))?;
        self.registry.new_update_tenant_payload(
            &self.ctx,
            input.client_mutation_id,
            &tenant_id,
            tenant,
            &response.cursor,
        )
    }
}

pub struct DeleteTenant {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn TenantClientFactory>,
}

impl DeleteTenant {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn TenantClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: DeleteTenantInput,
    ) -> Result<DeleteTenantPayload> {
        let tenant_id = input.tenant_id.0;
        require_non_blank("tenantID", &tenant_id)?;

        let client = self
            .ctx
            .call("tenant.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "DeleteTenant",
                client.delete_tenant(DeleteTenantRequest {
                    tenant_id: tenant_id.clone(),
                }),
            )
            .await;
        client.close();

        ensure_no_error("DeleteTenant", response?)?;
        self.registry
            .new_delete_tenant_payload(&self.ctx, input.client_mutation_id, &tenant_id)
    }
}

// ── Payloads ────────────────────────────────────────────────────────────────

pub struct CreateTenantPayload {
    client_mutation_id: Option<String>,
    tenant: TenantTypeEdgeResolver,
}

impl CreateTenantPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, tenant: TenantTypeEdgeResolver) -> Self {
        Self {
            client_mutation_id,
            tenant,
        }
    }
}

#[Object]
impl CreateTenantPayload {
    async fn tenant(&self) -> &TenantTypeEdgeResolver {
        &self.tenant
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct UpdateTenantPayload {
    client_mutation_id: Option<String>,
    tenant: TenantTypeEdgeResolver,
}

impl UpdateTenantPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, tenant: TenantTypeEdgeResolver) -> Self {
        Self {
            client_mutation_id,
            tenant,
        }
    }
}

#[Object]
impl UpdateTenantPayload {
    async fn tenant(&self) -> &TenantTypeEdgeResolver {
        &self.tenant
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct DeleteTenantPayload {
    client_mutation_id: Option<String>,
    deleted_tenant_id: String,
}

impl DeleteTenantPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, tenant_id: &str) -> Self {
        Self {
            client_mutation_id,
            deleted_tenant_id: tenant_id.to_string(),
        }
    }
}

#[Object]
impl DeleteTenantPayload {
    #[graphql(name = "deletedTenantID")]
    async fn deleted_tenant_id(&self) -> ID {
        ID(self.deleted_tenant_id.clone())
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}
