use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};

/// An error talking to the GraphQL endpoint
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    #[error(transparent)]
    HeaderName(#[from] InvalidHeaderName),

    #[error(transparent)]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("GraphQL errors in response: {}", .0.join("; "))]
    Response(Vec<String>),

    #[error("response contained no data")]
    MissingData,

    #[error("could not decode response data: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphQLError {
    /// Returns `true` if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, GraphQLError::Request(req_err) if
            req_err.is_connect()
            || req_err.is_timeout()
            || req_err.status().is_some_and(|status| {
                status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
            })
        )
    }
}

/// Why a live introspection attempt could not produce a snapshot
#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Request(#[from] GraphQLError),

    #[error("schema does not declare the {0} enum")]
    MissingWidgetEnum(&'static str),
}

impl IntrospectionError {
    /// Returns `true` if a later attempt against the same backend could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            IntrospectionError::Request(error) => error.is_transient(),
            IntrospectionError::MissingWidgetEnum(_) => false,
        }
    }
}

/// An error asking the schema cache a capability question
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema has not been introspected; call introspect_schema() first")]
    NotIntrospected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_joins_messages() {
        let error = GraphQLError::Response(vec![
            "Field 'widgets' doesn't exist".to_string(),
            "permission denied".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "GraphQL errors in response: Field 'widgets' doesn't exist; permission denied"
        );
    }

    #[test]
    fn response_error_is_not_transient() {
        assert!(!GraphQLError::Response(vec!["boom".to_string()]).is_transient());
        assert!(!GraphQLError::MissingData.is_transient());
    }

    #[test]
    fn header_value_error_is_not_transient() {
        let invalid_value = reqwest::header::HeaderValue::from_bytes(b"\0invalid").unwrap_err();
        assert!(!GraphQLError::from(invalid_value).is_transient());
    }

    #[tokio::test]
    async fn server_error_is_transient() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let response = reqwest::get(server.url()).await.unwrap();
        let error = GraphQLError::from(response.error_for_status().unwrap_err());
        assert!(error.is_transient());
    }

    #[test]
    fn missing_widget_enum_is_permanent() {
        assert!(!IntrospectionError::MissingWidgetEnum("WorkItemWidgetType").is_transient());
        assert!(
            !IntrospectionError::from(GraphQLError::Response(vec!["disabled".to_string()]))
                .is_transient()
        );
    }

    #[test]
    fn not_introspected_has_fixed_message() {
        assert_eq!(
            SchemaError::NotIntrospected.to_string(),
            "schema has not been introspected; call introspect_schema() first"
        );
    }
}
