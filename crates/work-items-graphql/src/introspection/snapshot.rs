use std::collections::{HashMap, HashSet};

use super::fallback::{FALLBACK_FEATURES, FALLBACK_WIDGET_TYPES, well_known_fields};
use super::types::{FieldDescriptor, TypeDescriptor};
use crate::errors::IntrospectionError;
use crate::naming::WIDGET_TYPE_PREFIX;

/// The enum whose values name every widget the backend supports
pub const WIDGET_ENUM_TYPE: &str = "WorkItemWidgetType";

/// Types kept in addition to everything starting with [`WIDGET_TYPE_PREFIX`]
const INDEXED_TYPE_NAMES: [&str; 3] = ["WorkItem", "WorkItemType", "WorkItemConnection"];

/// Where a snapshot's capabilities came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Built from a successful introspection of the remote schema
    Live,
    /// Substituted after introspection failed
    Fallback,
}

/// The reduced, immutable view of the remote schema that capability questions are answered from.
///
/// Types live in a flat index keyed by name; relationships between them are
/// resolved by looking names up again rather than by holding references.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSnapshot {
    widget_type_names: Vec<String>,
    type_index: HashMap<String, TypeDescriptor>,
    available_features: HashSet<String>,
    origin: SnapshotOrigin,
}

impl SchemaSnapshot {
    /// Reduce a full introspected type list to the work item types and their widgets.
    pub fn from_types(
        types: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<Self, IntrospectionError> {
        let mut widget_type_names = None;
        let mut type_index = HashMap::new();

        for descriptor in types {
            if descriptor.name == WIDGET_ENUM_TYPE {
                widget_type_names = descriptor
                    .enum_values
                    .as_ref()
                    .map(|values| values.iter().map(|value| value.name.clone()).collect());
            }
            if is_indexed(&descriptor.name) {
                type_index.insert(descriptor.name.clone(), descriptor);
            }
        }

        let widget_type_names: Vec<String> =
            widget_type_names.ok_or(IntrospectionError::MissingWidgetEnum(WIDGET_ENUM_TYPE))?;
        let available_features = widget_type_names.iter().cloned().collect();

        Ok(Self {
            widget_type_names,
            type_index,
            available_features,
            origin: SnapshotOrigin::Live,
        })
    }

    /// The fixed snapshot used when the remote schema cannot be introspected
    pub fn fallback() -> Self {
        Self {
            widget_type_names: FALLBACK_WIDGET_TYPES.iter().map(ToString::to_string).collect(),
            type_index: HashMap::new(),
            available_features: FALLBACK_FEATURES.iter().map(ToString::to_string).collect(),
            origin: SnapshotOrigin::Fallback,
        }
    }

    /// Widget enum values, in the order the schema declared them
    pub fn widget_type_names(&self) -> &[String] {
        &self.widget_type_names
    }

    pub fn type_index(&self) -> &HashMap<String, TypeDescriptor> {
        &self.type_index
    }

    pub fn available_features(&self) -> &HashSet<String> {
        &self.available_features
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == SnapshotOrigin::Fallback
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.available_features.contains(feature)
    }

    /// Whether the backend declares the given widget.
    ///
    /// Only widget names count. The coarse flags of a fallback snapshot are
    /// answered by [`SchemaSnapshot::has_feature`].
    pub fn is_widget_type_available(&self, widget: &str) -> bool {
        self.widget_type_names.iter().any(|name| name == widget)
    }

    /// Fields of an indexed type, then the hard-coded fields of well-known widget types, then nothing.
    pub fn fields_for_type(&self, type_name: &str) -> &[FieldDescriptor] {
        match self.type_index.get(type_name) {
            Some(descriptor) => descriptor.fields.as_deref().unwrap_or_default(),
            None => well_known_fields(type_name).unwrap_or_default(),
        }
    }

    pub fn has_field(&self, type_name: &str, field_name: &str) -> bool {
        self.fields_for_type(type_name)
            .iter()
            .any(|field| field.name == field_name)
    }
}

fn is_indexed(type_name: &str) -> bool {
    type_name.starts_with(WIDGET_TYPE_PREFIX) || INDEXED_TYPE_NAMES.contains(&type_name)
}
