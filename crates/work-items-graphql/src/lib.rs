#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod errors;
pub mod graphql;
pub mod introspection;
pub mod naming;
pub mod query_builder;
mod safe_fields;
#[cfg(test)]
mod test_support;
mod work_item_widgets;

pub use introspection::{SchemaIntrospector, SchemaSnapshot, SnapshotOrigin};
pub use query_builder::{DynamicQueryBuilder, QueryDocument, WorkItemsVariables};
pub use work_item_widgets::WorkItemWidgets;
