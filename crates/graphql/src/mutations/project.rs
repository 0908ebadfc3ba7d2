//! Project mutations and their payloads.

use std::sync::Arc;

use {
    async_graphql::{ID, InputObject, Object},
    edgecloud_common::{Error, Result, require_non_blank},
    edgecloud_service_traits::{
        ProjectClientFactory,
        project::{CreateProjectRequest, DeleteProjectRequest, Project, UpdateProjectRequest},
    },
};

use crate::{
    context::RequestContext, error::ensure_no_error, queries::project::ProjectTypeEdgeResolver,
    registry::ResolverRegistry,
};

// ── Inputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, InputObject)]
pub struct CreateProjectInput {
    pub name: String,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateProjectInput {
    #[graphql(name = "projectID")]
    pub project_id: ID,
    pub name: String,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct DeleteProjectInput {
    #[graphql(name = "projectID")]
    pub project_id: ID,
    pub client_mutation_id: Option<String>,
}

// ── Mutations ───────────────────────────────────────────────────────────────

pub struct CreateProject {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn ProjectClientFactory>,
}

impl CreateProject {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn ProjectClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: CreateProjectInput,
    ) -> Result<CreateProjectPayload> {
        require_non_blank("name", &input.name)?;

        let client = self
            .ctx
            .call("project.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "CreateProject",
                client.create_project(CreateProjectRequest {
                    project: Some(Project { name: input.name }),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("CreateProject", response?)?;
        let project = response
            .project
            .ok_or_else(|| Error::unknown("CreateProject returned no project"))?;
        self.registry.new_create_project_payload(
            &self.ctx,
            input.client_mutation_id,
            &response.project_id,
            project,
            &response.cursor,
        )
    }
}

pub struct UpdateProject {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn ProjectClientFactory>,
}

impl UpdateProject {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn ProjectClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: UpdateProjectInput,
    ) -> Result<UpdateProjectPayload> {
        let project_id = input.project_id.0;
        require_non_blank("projectID", &project_id)?;
        require_non_blank("name", &input.name)?;

        let client = self
            .ctx
            .call("project.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "UpdateProject",
                client.update_project(UpdateProjectRequest {
                    project_id: project_id.clone(),
                    project: Some(Project { name: input.name }),
                }),
            )
            .await;
        client.close();

        let response = ensure_no_error("UpdateProject", response?)?;
        let project = response
            .project
            .ok_or_else(|| Error::unknown("UpdateProject returned no project"))?;
        self.registry.new_update_project_payload(
            &self.ctx,
            input.client_mutation_id,
            &project_id,
            project,
            &response.cursor,
        )
    }
}

pub struct DeleteProject {
    ctx: RequestContext,
    registry: Arc<dyn ResolverRegistry>,
    factory: Arc<dyn ProjectClientFactory>,
}

impl DeleteProject {
    pub(crate) fn new(
        ctx: RequestContext,
        registry: Arc<dyn ResolverRegistry>,
        factory: Arc<dyn ProjectClientFactory>,
    ) -> Self {
        Self {
            ctx,
            registry,
            factory,
        }
    }

    pub async fn mutate_and_get_payload(
        &self,
        input: DeleteProjectInput,
    ) -> Result<DeleteProjectPayload> {
        let project_id = input.project_id.0;
        require_non_blank("projectID", &project_id)?;

        let client = self
            .ctx
            .call("project.connect", self.factory.create_client())
            .await?;
        let response = self
            .ctx
            .call(
                "DeleteProject",
                client.delete_project(DeleteProjectRequest {
                    project_id: project_id.clone(),
                }),
            )
            .await;
        client.close();

        ensure_no_error("DeleteProject", response?)?;
        self.registry
            .new_delete_project_payload(&self.ctx, input.client_mutation_id, &project_id)
    }
}

// ── Payloads ────────────────────────────────────────────────────────────────

pub struct CreateProjectPayload {
    client_mutation_id: Option<String>,
    project: ProjectTypeEdgeResolver,
}

impl CreateProjectPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, project: ProjectTypeEdgeResolver) -> Self {
        Self {
            client_mutation_id,
            project,
        }
    }
}

#[Object]
impl CreateProjectPayload {
    async fn project(&self) -> &ProjectTypeEdgeResolver {
        &self.project
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct UpdateProjectPayload {
    client_mutation_id: Option<String>,
    project: ProjectTypeEdgeResolver,
}

impl UpdateProjectPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, project: ProjectTypeEdgeResolver) -> Self {
        Self {
            client_mutation_id,
            project,
        }
    }
}

#[Object]
impl UpdateProjectPayload {
    async fn project(&self) -> &ProjectTypeEdgeResolver {
        &self.project
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}

pub struct DeleteProjectPayload {
    client_mutation_id: Option<String>,
    deleted_project_id: String,
}

impl DeleteProjectPayload {
    pub(crate) fn new(client_mutation_id: Option<String>, project_id: &str) -> Self {
        Self {
            client_mutation_id,
            deleted_project_id: project_id.to_string(),
        }
    }
}

#[Object]
impl DeleteProjectPayload {
    #[graphql(name = "deletedProjectID")]
    async fn deleted_project_id(&self) -> ID {
        ID(self.deleted_project_id.clone())
    }

    async fn client_mutation_id(&self) -> Option<&str> {
        self.client_mutation_id.as_deref()
    }
}
