//! Tenant backend contract (`tenant.Service`).

use async_trait::async_trait;

use crate::{
    ServiceResult,
    common::{Error, Pagination, SortingOptionPair},
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tenant {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TenantWithCursor {
    #[prost(string, tag = "1")]
    pub tenant_id: String,
    #[prost(message, optional, tag = "2")]
    pub tenant: Option<Tenant>,
    #[prost(string, tag = "3")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTenantRequest {
    #[prost(message, optional, tag = "1")]
    pub tenant: Option<Tenant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTenantResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(string, tag = "3")]
    pub tenant_id: String,
    #[prost(message, optional, tag = "4")]
    pub tenant: Option<Tenant>,
    #[prost(string, tag = "5")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadTenantRequest {
    #[prost(string, tag = "1")]
    pub tenant_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadTenantResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub tenant: Option<Tenant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateTenantRequest {
    #[prost(string, tag = "1")]
    pub tenant_id: String,
    #[prost(message, optional, tag = "2")]
    pub tenant: Option<Tenant>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateTenantResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub tenant: Option<Tenant>,
    #[prost(string, tag = "4")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteTenantRequest {
    #[prost(string, tag = "1")]
    pub tenant_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteTenantResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListTenantsRequest {
    #[prost(message, optional, tag = "1")]
    pub pagination: Option<Pagination>,
    #[prost(message, repeated, tag = "2")]
    pub sorting_options: Vec<SortingOptionPair>,
    #[prost(string, repeated, tag = "3")]
    pub tenant_ids: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListTenantsResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(bool, tag = "3")]
    pub has_previous_page: bool,
    #[prost(bool, tag = "4")]
    pub has_next_page: bool,
    #[prost(int64, tag = "5")]
    pub total_count: i64,
    #[prost(message, repeated, tag = "6")]
    pub tenants: Vec<TenantWithCursor>,
}

crate::impl_business_outcome!(
    CreateTenantResponse,
    ReadTenantResponse,
    UpdateTenantResponse,
    DeleteTenantResponse,
    ListTenantsResponse,
);

/// Typed client for `tenant.Service`.
#[async_trait]
pub trait TenantService: Send + Sync {
    async fn create_tenant(&self, request: CreateTenantRequest)
    -> ServiceResult<CreateTenantResponse>;
    async fn read_tenant(&self, request: ReadTenantRequest) -> ServiceResult<ReadTenantResponse>;
    async fn update_tenant(&self, request: UpdateTenantRequest)
    -> ServiceResult<UpdateTenantResponse>;
    async fn delete_tenant(&self, request: DeleteTenantRequest)
    -> ServiceResult<DeleteTenantResponse>;
    async fn list_tenants(&self, request: ListTenantsRequest) -> ServiceResult<ListTenantsResponse>;
}
