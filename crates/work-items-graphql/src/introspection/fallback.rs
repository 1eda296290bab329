//! The conservative capability set used when live introspection fails

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::{FieldDescriptor, TypeKind, TypeRef};

/// Widgets present on every backend edition that has work items at all
pub const FALLBACK_WIDGET_TYPES: [&str; 5] =
    ["ASSIGNEES", "LABELS", "MILESTONE", "DESCRIPTION", "HIERARCHY"];

/// Coarse capability flags of a degraded snapshot
pub const FALLBACK_FEATURES: [&str; 3] = ["workItems", "widgets", "hierarchy"];

static WELL_KNOWN_FIELDS: LazyLock<HashMap<&'static str, Vec<FieldDescriptor>>> =
    LazyLock::new(|| {
        let object = |name: &str| TypeRef::named(name, TypeKind::Object);
        let scalar = |name: &str| TypeRef::named(name, TypeKind::Scalar);

        HashMap::from([
            (
                "WorkItemWidgetAssignees",
                vec![FieldDescriptor::new("assignees", object("UserCoreConnection"))],
            ),
            (
                "WorkItemWidgetLabels",
                vec![FieldDescriptor::new("labels", object("LabelConnection"))],
            ),
            (
                "WorkItemWidgetMilestone",
                vec![FieldDescriptor::new("milestone", object("Milestone"))],
            ),
            (
                "WorkItemWidgetDescription",
                vec![
                    FieldDescriptor::new("description", scalar("String")),
                    FieldDescriptor::new("edited", TypeRef::non_null(scalar("Boolean"))),
                ],
            ),
            (
                "WorkItemWidgetHierarchy",
                vec![
                    FieldDescriptor::new("parent", object("WorkItem")),
                    FieldDescriptor::new("hasChildren", TypeRef::non_null(scalar("Boolean"))),
                ],
            ),
        ])
    });

/// Hard-coded fields for widget types every backend is known to expose
pub(crate) fn well_known_fields(type_name: &str) -> Option<&'static [FieldDescriptor]> {
    WELL_KNOWN_FIELDS.get(type_name).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::widget_type_name;

    #[test]
    fn every_fallback_widget_has_known_fields() {
        for widget in FALLBACK_WIDGET_TYPES {
            let fields = well_known_fields(&widget_type_name(widget));
            assert!(
                fields.is_some_and(|fields| !fields.is_empty()),
                "{widget} has no fallback fields"
            );
        }
    }

    #[test]
    fn unknown_types_have_no_fields() {
        assert!(well_known_fields("WorkItemWidgetNotes").is_none());
    }
}
