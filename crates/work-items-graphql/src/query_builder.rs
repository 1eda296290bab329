//! Build work item queries that only select widget fields the backend is known to have

mod response;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::introspection::SchemaSnapshot;
use crate::safe_fields::widget_fragment;

pub use response::{Namespace, PageInfo, WorkItem, WorkItemConnection, WorkItemTypeRef, WorkItemsData};

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

const FULL_OPERATION_NAME: &str = "GetWorkItems";
const MINIMAL_OPERATION_NAME: &str = "GetWorkItemsMinimal";

// Indentation of the widget fragments inside the `widgets { ... }` selection
const FRAGMENT_INDENT: usize = 10;

/// A ready-to-execute GraphQL document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    operation_name: &'static str,
    query: String,
}

impl QueryDocument {
    pub fn operation_name(&self) -> &str {
        self.operation_name
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for QueryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

/// Variables accepted by every document the builder produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemsVariables {
    pub full_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl WorkItemsVariables {
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            types: None,
            first: Some(DEFAULT_PAGE_SIZE),
            after: None,
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_first(mut self, first: u32) -> Self {
        self.first = Some(first);
        self
    }

    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}

/// Assembles work item queries from a schema snapshot.
///
/// Building is synchronous and has no side effects, so one builder can be
/// shared freely. Widgets the snapshot does not declare, or that have nothing
/// safe to select, are left out of the document rather than reported.
#[derive(Debug, Clone)]
pub struct DynamicQueryBuilder {
    snapshot: Arc<SchemaSnapshot>,
}

impl DynamicQueryBuilder {
    pub fn new(snapshot: Arc<SchemaSnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    /// The widgets a full query would select, in output order.
    ///
    /// With no request every available widget is used in schema order.
    /// Otherwise the requested order is kept, unavailable widgets are dropped
    /// and repeats collapse to their first occurrence.
    pub fn resolve_widgets<S: AsRef<str>>(&self, requested: Option<&[S]>) -> Vec<String> {
        match requested {
            None => self.snapshot.widget_type_names().to_vec(),
            Some(requested) => {
                let mut widgets: Vec<String> = Vec::with_capacity(requested.len());
                for widget in requested.iter().map(AsRef::as_ref) {
                    if !self.snapshot.is_widget_type_available(widget) {
                        tracing::debug!("widget {widget} is not available on this backend");
                    } else if !widgets.iter().any(|seen| seen == widget) {
                        widgets.push(widget.to_string());
                    }
                }
                widgets
            }
        }
    }

    /// Query work items with identity fields and every safe widget selection.
    pub fn build_full_query<S: AsRef<str>>(&self, requested: Option<&[S]>) -> QueryDocument {
        let fragments: Vec<String> = self
            .resolve_widgets(requested)
            .iter()
            .filter_map(|widget| self.widget_fragment(widget))
            .collect();

        let mut widgets = String::from("widgets {\n          type\n");
        for fragment in fragments {
            widgets.push_str(&fragment);
            widgets.push('\n');
        }
        widgets.push_str("        }");

        QueryDocument {
            operation_name: FULL_OPERATION_NAME,
            query: work_items_query(FULL_OPERATION_NAME, &widgets),
        }
    }

    /// Query work items with identity fields and widget types only. Does not depend on the snapshot.
    pub fn build_minimal_query() -> QueryDocument {
        QueryDocument {
            operation_name: MINIMAL_OPERATION_NAME,
            query: work_items_query(MINIMAL_OPERATION_NAME, "widgets {\n          type\n        }"),
        }
    }

    /// The inline fragment for one widget, or `None` when nothing in it is safe to select
    pub fn widget_fragment(&self, widget: &str) -> Option<String> {
        widget_fragment(&self.snapshot, widget, FRAGMENT_INDENT)
    }
}

fn work_items_query(operation_name: &str, widgets: &str) -> String {
    format!(
        r#"query {operation_name}($fullPath: ID!, $types: [IssueType!], $first: Int, $after: String) {{
  namespace(fullPath: $fullPath) {{
    workItems(types: $types, first: $first, after: $after) {{
      nodes {{
        id
        iid
        title
        state
        workItemType {{
          id
          name
        }}
        webUrl
        createdAt
        updatedAt
        {widgets}
      }}
      pageInfo {{
        hasNextPage
        endCursor
      }}
    }}
  }}
}}"#
    )
}
