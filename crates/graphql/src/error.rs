//! Error mapping from backend outcomes to GraphQL errors.

use {
    async_graphql::ErrorExtensions,
    edgecloud_common::{Error, Result},
    edgecloud_service_traits::BusinessOutcome,
    tracing::warn,
};

/// Convert a core error into an `async_graphql::Error`.
///
/// The message is the error's display text; `extensions.code` carries the
/// error category and, for business errors, `extensions.backendCode` the
/// backend's sentinel name.
pub fn gql_err(err: Error) -> async_graphql::Error {
    let code = err.code();
    let backend_code = match &err {
        Error::Business { code, .. } => Some(code.clone()),
        _ => None,
    };
    async_graphql::Error::new(err.to_string()).extend_with(|_, extensions| {
        extensions.set("code", code.to_string());
        if let Some(backend_code) = &backend_code {
            extensions.set("backendCode", backend_code.clone());
        }
    })
}

/// Accept a completed backend response only when its sentinel says success.
///
/// A blank backend message is replaced by one naming the operation and the
/// sentinel, so the GraphQL error never has an empty message.
pub fn ensure_no_error<R: BusinessOutcome>(operation: &str, response: R) -> Result<R> {
    if response.is_success() {
        return Ok(response);
    }

    let code = response.outcome().as_str_name();
    let message = match response.error_message().trim() {
        "" => format!("{operation} failed: {code}"),
        message => message.to_string(),
    };
    warn!(operation, code, %message, "backend reported an error");
    Err(Error::business(code, message))
}

#[cfg(test)]
mod tests {
    use edgecloud_service_traits::{common::Error as Sentinel, project::ReadProjectResponse};

    use super::*;

    #[test]
    fn success_passes_response_through() {
        let response = ReadProjectResponse::default();
        assert!(ensure_no_error("ReadProject", response).is_ok());
    }

    #[test]
    fn business_error_carries_backend_message() {
        let response = ReadProjectResponse {
            error: Sentinel::NotFound as i32,
            error_message: "project p1 not found".into(),
            project: None,
        };
        match ensure_no_error("ReadProject", response) {
            Err(Error::Business { code, message }) => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "project p1 not found");
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_backend_message_is_replaced() {
        let response = ReadProjectResponse {
            error: Sentinel::Unknown as i32,
            ..Default::default()
        };
        let err = ensure_no_error("ReadProject", response).err();
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("ReadProject failed: UNKNOWN")
        );
    }

    #[test]
    fn gql_error_exposes_code() {
        let err = gql_err(Error::business("ALREADY_EXISTS", "duplicate"));
        assert_eq!(err.message, "duplicate");
        let extensions = err
            .extensions
            .as_ref()
            .map(|e| (e.get("code").cloned(), e.get("backendCode").cloned()));
        assert_eq!(
            extensions,
            Some((
                Some(async_graphql::Value::from("BUSINESS".to_string())),
                Some(async_graphql::Value::from("ALREADY_EXISTS".to_string())),
            ))
        );
    }
}
