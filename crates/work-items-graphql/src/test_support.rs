use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::GraphQLError;
use crate::graphql::GraphQLClient;
use crate::introspection::SchemaSnapshot;

pub(crate) fn fixture_data() -> Value {
    serde_json::from_str(include_str!("../tests/fixtures/introspection.json")).unwrap()
}

pub(crate) fn fixture_snapshot() -> SchemaSnapshot {
    let data: crate::introspection::types::IntrospectionData =
        serde_json::from_value(fixture_data()).unwrap();
    SchemaSnapshot::from_types(data.schema.types).unwrap()
}

/// Answers every request with the same canned `data`, or fails every request
pub(crate) struct CannedClient {
    data: Option<Value>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CannedClient {
    pub(crate) fn returning(data: Value) -> Self {
        Self {
            data: Some(data),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            data: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GraphQLClient for CannedClient {
    async fn request<T>(
        &self,
        _document: &str,
        _operation_name: Option<&str>,
        _variables: Value,
    ) -> Result<T, GraphQLError>
    where
        T: DeserializeOwned + Send,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.data {
            Some(data) => Ok(serde_json::from_value(data.clone())?),
            None => Err(GraphQLError::Response(vec![
                "connection refused".to_string(),
            ])),
        }
    }
}
