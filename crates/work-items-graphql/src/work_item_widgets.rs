use crate::errors::GraphQLError;
use crate::graphql::GraphQLClient;
use crate::introspection::SchemaIntrospector;
use crate::query_builder::{DynamicQueryBuilder, QueryDocument, WorkItemsData, WorkItemsVariables};

/// Fetch work items with whatever widgets the connected backend supports.
///
/// Owns a client and the schema cache for it. The schema is introspected on
/// first use and reused for every later query.
pub struct WorkItemWidgets<C> {
    introspector: SchemaIntrospector<C>,
}

impl<C: GraphQLClient> WorkItemWidgets<C> {
    pub fn new(client: C) -> Self {
        Self {
            introspector: SchemaIntrospector::new(client),
        }
    }

    pub fn introspector(&self) -> &SchemaIntrospector<C> {
        &self.introspector
    }

    /// A builder over the cached snapshot, introspecting first if needed
    pub async fn query_builder(&self) -> DynamicQueryBuilder {
        DynamicQueryBuilder::new(self.introspector.introspect_schema().await)
    }

    /// Fetch one page of work items with the requested widgets, or every available one.
    #[tracing::instrument(skip_all, fields(full_path = %variables.full_path))]
    pub async fn fetch_work_items<S: AsRef<str>>(
        &self,
        variables: &WorkItemsVariables,
        requested: Option<&[S]>,
    ) -> Result<WorkItemsData, GraphQLError> {
        let document = self.query_builder().await.build_full_query(requested);
        self.execute(&document, variables).await
    }

    /// Fetch one page of work items with widget types only
    #[tracing::instrument(skip_all, fields(full_path = %variables.full_path))]
    pub async fn fetch_work_items_minimal(
        &self,
        variables: &WorkItemsVariables,
    ) -> Result<WorkItemsData, GraphQLError> {
        self.execute(&DynamicQueryBuilder::build_minimal_query(), variables)
            .await
    }

    async fn execute(
        &self,
        document: &QueryDocument,
        variables: &WorkItemsVariables,
    ) -> Result<WorkItemsData, GraphQLError> {
        tracing::debug!(operation = document.operation_name(), "executing work items query");
        self.introspector
            .client()
            .request(
                document.query(),
                Some(document.operation_name()),
                serde_json::to_value(variables)?,
            )
            .await
    }
}
