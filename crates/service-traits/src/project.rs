//! Project backend contract (`project.Service`).

use async_trait::async_trait;

use crate::{
    ServiceResult,
    common::{Error, Pagination, SortingOptionPair},
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Project {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProjectWithCursor {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(message, optional, tag = "2")]
    pub project: Option<Project>,
    #[prost(string, tag = "3")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateProjectRequest {
    #[prost(message, optional, tag = "1")]
    pub project: Option<Project>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateProjectResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(string, tag = "3")]
    pub project_id: String,
    #[prost(message, optional, tag = "4")]
    pub project: Option<Project>,
    #[prost(string, tag = "5")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadProjectRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadProjectResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub project: Option<Project>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateProjectRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(message, optional, tag = "2")]
    pub project: Option<Project>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateProjectResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(message, optional, tag = "3")]
    pub project: Option<Project>,
    #[prost(string, tag = "4")]
    pub cursor: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteProjectRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteProjectResponse {
    #[prost(enumeration = "Error", tag = "1")]
    pub error: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProjectsRequest {
    #[prost(message, optional, tag = "1")]
    pub pagination: Option<Pagination>,
    #[prost(message, repeated, tag = "2")]
    pub sorting_options: Vec<SortingOptionPair>,
    #[prost(string, repeated, tag = "3")]
    pub project_ids: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProjectsResponse {
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
    pub projects: Vec<ProjectWithCursor>,
}

crate::impl_business_outcome!(
    CreateProjectResponse,
    ReadProjectResponse,
    UpdateProjectResponse,
    DeleteProjectResponse,
    ListProjectsResponse,
);

/// Typed client for `project.Service`.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn create_project(&self, request: CreateProjectRequest)
    -> ServiceResult<CreateProjectResponse>;
    async fn read_project(&self, request: ReadProjectRequest) -> ServiceResult<ReadProjectResponse>;
    async fn update_project(&self, request: UpdateProjectRequest)
    -> ServiceResult<UpdateProjectResponse>;
    async fn delete_project(&self, request: DeleteProjectRequest)
    -> ServiceResult<DeleteProjectResponse>;
    async fn list_projects(&self, request: ListProjectsRequest) -> ServiceResult<ListProjectsResponse>;
}
