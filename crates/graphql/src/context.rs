//! Request-scoped context and the schema-level data resolvers reach through.

use std::{future::Future, sync::Arc, time::Duration};

use {
    edgecloud_common::{Error, Result},
    edgecloud_service_traits::ServiceResult,
    tokio_util::sync::CancellationToken,
    tracing::debug,
};

use crate::registry::ResolverRegistry;

/// Per-request state handed to every resolver the registry builds.
///
/// Supplied by the HTTP layer through the GraphQL request data. Cancelling
/// `cancel` aborts every in-flight backend call of the request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: String,
    pub cancel: CancellationToken,
    /// Upper bound for any single backend call (dial included).
    pub timeout: Option<Duration>,
}

impl RequestContext {
    #[must_use]
    pub fn new(request_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: user_id.into(),
            cancel: CancellationToken::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run one backend call under this request's cancellation and timeout.
    ///
    /// Cancellation, timeout, and [`ServiceError`](edgecloud_service_traits::ServiceError)
    /// all surface as [`Error::Transport`].
    pub async fn call<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        debug!(request_id = %self.request_id, operation, "backend call");
        let guarded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .map_err(|_| {
                        Error::transport(format!(
                            "{operation} timed out after {}ms",
                            limit.as_millis()
                        ))
                    })?
                    .map_err(Error::from),
                None => call.await.map_err(Error::from),
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(request_id = %self.request_id, operation, "backend call cancelled");
                Err(Error::transport(format!("{operation} cancelled")))
            },
            result = guarded => result,
        }
    }
}

/// Schema-level data injected via `Schema::build(..).data(..)`.
pub struct GqlContext {
    pub registry: Arc<dyn ResolverRegistry>,
    /// User the `user` root field resolves when the request context does not
    /// name one.
    pub default_user_id: String,
    pub request_timeout: Option<Duration>,
}

impl GqlContext {
    /// The request context attached by the HTTP layer, or a fresh one for
    /// requests executed directly against the schema.
    pub fn request_context(&self, ctx: &async_graphql::Context<'_>) -> RequestContext {
        match ctx.data_opt::<RequestContext>() {
            Some(request) => request.clone(),
            None => RequestContext::new(uuid::Uuid::new_v4().to_string(), &self.default_user_id)
                .with_timeout(self.request_timeout),
        }
    }
}

/// Fetch the registry and request context for a root field.
pub fn scope(
    ctx: &async_graphql::Context<'_>,
) -> async_graphql::Result<(Arc<dyn ResolverRegistry>, RequestContext)> {
    let gql = ctx.data::<Arc<GqlContext>>()?;
    Ok((Arc::clone(&gql.registry), gql.request_context(ctx)))
}
