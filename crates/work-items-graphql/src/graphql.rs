//! Execute GraphQL documents against a remote endpoint

use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::errors::GraphQLError;

/// Something that can run a GraphQL document and hand back its `data`.
///
/// `operation_name` selects the operation to run and lets the backend attribute
/// the request in its logs.
pub trait GraphQLClient: Send + Sync {
    fn request<T>(
        &self,
        document: &str,
        operation_name: Option<&str>,
        variables: Value,
    ) -> impl Future<Output = Result<T, GraphQLError>> + Send
    where
        T: DeserializeOwned + Send;
}

/// A [`GraphQLClient`] that POSTs documents over HTTP.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(endpoint: Url, headers: HeaderMap, timeout: Duration) -> Result<Self, GraphQLError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: &SecretString) -> Result<Self, GraphQLError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl GraphQLClient for HttpClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, operation = operation_name))]
    async fn request<T>(
        &self,
        document: &str,
        operation_name: Option<&str>,
        variables: Value,
    ) -> Result<T, GraphQLError>
    where
        T: DeserializeOwned + Send,
    {
        let body = RequestBody {
            query: document,
            operation_name,
            variables,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: graphql_client::Response<Value> = response.json().await?;
        decode_envelope(envelope)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_name: Option<&'a str>,
    variables: Value,
}

/// Unwrap the `{data, errors}` envelope. Partial data wins over errors.
fn decode_envelope<T: DeserializeOwned>(
    envelope: graphql_client::Response<Value>,
) -> Result<T, GraphQLError> {
    let messages: Vec<String> = envelope
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|error| error.message)
        .collect();

    match envelope.data {
        Some(Value::Null) | None if !messages.is_empty() => Err(GraphQLError::Response(messages)),
        Some(Value::Null) | None => Err(GraphQLError::MissingData),
        Some(data) => {
            if !messages.is_empty() {
                tracing::warn!("GraphQL response carried partial data with errors: {messages:?}");
            }
            Ok(serde_json::from_value(data)?)
        }
    }
}
