use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::json;
use tokio::sync::Mutex;

use super::{INTROSPECTION_OPERATION_NAME, INTROSPECTION_QUERY};
use super::snapshot::SchemaSnapshot;
use super::types::{FieldDescriptor, IntrospectionData};
use crate::errors::{IntrospectionError, SchemaError};
use crate::graphql::GraphQLClient;
use crate::query_builder::DynamicQueryBuilder;
use crate::safe_fields::widget_fragment;

/// Introspects the remote schema once and answers capability questions from the cached result.
///
/// Each instance owns its own cache; share one per connection or session.
/// Capability questions asked before [`SchemaIntrospector::introspect_schema`]
/// has completed return [`SchemaError::NotIntrospected`].
pub struct SchemaIntrospector<C> {
    client: C,
    cache: RwLock<Option<Arc<SchemaSnapshot>>>,
    // Held while a snapshot is being fetched so concurrent first callers share one request
    populating: Mutex<()>,
}

impl<C: GraphQLClient> SchemaIntrospector<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: RwLock::new(None),
            populating: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Return the cached snapshot, introspecting the remote schema first if there is none.
    ///
    /// Never fails: if the request or its payload is bad, the fallback snapshot
    /// is cached and returned instead.
    pub async fn introspect_schema(&self) -> Arc<SchemaSnapshot> {
        if let Some(snapshot) = self.cached_schema() {
            tracing::debug!("using cached schema snapshot");
            return snapshot;
        }

        let _populating = self.populating.lock().await;
        if let Some(snapshot) = self.cached_schema() {
            return snapshot;
        }

        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => {
                tracing::info!(
                    widgets = snapshot.widget_type_names().len(),
                    types = snapshot.type_index().len(),
                    "introspected work item widgets"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    transient = e.is_transient(),
                    "Schema introspection failed, falling back to default widgets: {e}"
                );
                SchemaSnapshot::fallback()
            }
        };

        let snapshot = Arc::new(snapshot);
        *self.cache.write() = Some(snapshot.clone());
        snapshot
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_snapshot(&self) -> Result<SchemaSnapshot, IntrospectionError> {
        let data: IntrospectionData = self
            .client
            .request(
                INTROSPECTION_QUERY,
                Some(INTROSPECTION_OPERATION_NAME),
                json!({}),
            )
            .await?;
        SchemaSnapshot::from_types(data.schema.types)
    }

    /// Drop the cached snapshot; the next introspection fetches a new one
    pub fn clear_cache(&self) {
        *self.cache.write() = None;
    }

    pub fn cached_schema(&self) -> Option<Arc<SchemaSnapshot>> {
        self.cache.read().clone()
    }

    fn snapshot(&self) -> Result<Arc<SchemaSnapshot>, SchemaError> {
        self.cached_schema().ok_or(SchemaError::NotIntrospected)
    }

    pub fn is_widget_type_available(&self, widget: &str) -> Result<bool, SchemaError> {
        Ok(self.snapshot()?.is_widget_type_available(widget))
    }

    pub fn available_widget_types(&self) -> Result<Vec<String>, SchemaError> {
        Ok(self.snapshot()?.widget_type_names().to_vec())
    }

    pub fn fields_for_type(&self, type_name: &str) -> Result<Vec<FieldDescriptor>, SchemaError> {
        Ok(self.snapshot()?.fields_for_type(type_name).to_vec())
    }

    pub fn has_field(&self, type_name: &str, field_name: &str) -> Result<bool, SchemaError> {
        Ok(self.snapshot()?.has_field(type_name, field_name))
    }

    /// One inline fragment per requested widget that is available and has safe fields.
    ///
    /// Unavailable and field-less widgets are left out. Before introspection
    /// nothing is known to be safe, so the result is empty.
    pub fn generate_safe_widget_query<S: AsRef<str>>(&self, requested: &[S]) -> String {
        let Some(snapshot) = self.cached_schema() else {
            tracing::debug!("no schema snapshot yet, no widgets are safe to query");
            return String::new();
        };

        requested
            .iter()
            .map(AsRef::as_ref)
            .filter(|widget| snapshot.is_widget_type_available(widget))
            .filter_map(|widget| widget_fragment(&snapshot, widget, 0))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A query builder over the current snapshot
    pub fn query_builder(&self) -> Result<DynamicQueryBuilder, SchemaError> {
        Ok(DynamicQueryBuilder::new(self.snapshot()?))
    }
}
