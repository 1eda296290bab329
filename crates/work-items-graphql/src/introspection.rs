//! Discover which work item widgets the connected backend supports
//!
//! The remote schema is introspected once, reduced to the work item types and
//! their widgets, and cached as a [`SchemaSnapshot`]. If introspection fails a
//! fixed fallback snapshot is cached instead, so callers always get an answer.

mod fallback;
mod introspector;
mod snapshot;
pub mod types;

pub use fallback::{FALLBACK_FEATURES, FALLBACK_WIDGET_TYPES};
pub use introspector::SchemaIntrospector;
pub use snapshot::{SchemaSnapshot, SnapshotOrigin, WIDGET_ENUM_TYPE};

/// Operation name of [`INTROSPECTION_QUERY`]
pub const INTROSPECTION_OPERATION_NAME: &str = "IntrospectWorkItemWidgets";

/// The introspection document. Field types are followed two levels deep, which
/// is enough to tell leaf fields from composite ones.
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectWorkItemWidgets {
  __schema {
    types {
      name
      kind
      fields {
        name
        type {
          name
          kind
          ofType {
            name
            kind
          }
        }
      }
      enumValues {
        name
        description
      }
    }
  }
}"#;
