//! Which widget fields can be selected without knowing more of the schema than the snapshot holds
//!
//! Leaf fields are always safe. Composite fields need a sub-selection, and the
//! snapshot does not index the types they point at, so only the fields listed in
//! [`NESTED_SELECTIONS`] are ever selected, each with its fixed shape. Adding
//! support for another nested widget field means adding a row to that table.

use crate::introspection::SchemaSnapshot;
use crate::introspection::types::FieldDescriptor;
use crate::naming::widget_type_name;

/// Every widget carries this field; callers select it once outside the fragments
pub(crate) const DISCRIMINATOR_FIELD: &str = "type";

struct NestedSelection {
    widget: &'static str,
    field: &'static str,
    selection: &'static str,
}

const NESTED_SELECTIONS: &[NestedSelection] = &[
    NestedSelection {
        widget: "ASSIGNEES",
        field: "assignees",
        selection: "{ nodes { id username } }",
    },
    NestedSelection {
        widget: "LABELS",
        field: "labels",
        selection: "{ nodes { id title } }",
    },
    NestedSelection {
        widget: "MILESTONE",
        field: "milestone",
        selection: "{ id title }",
    },
    NestedSelection {
        widget: "HIERARCHY",
        field: "parent",
        selection: "{ id title }",
    },
];

fn nested_selection(widget: &str, field: &str) -> Option<&'static str> {
    NESTED_SELECTIONS
        .iter()
        .find(|nested| nested.widget == widget && nested.field == field)
        .map(|nested| nested.selection)
}

/// Render the selectable fields of one widget, in schema order
pub(crate) fn safe_selections(widget: &str, fields: &[FieldDescriptor]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| field.name != DISCRIMINATOR_FIELD)
        .filter_map(|field| {
            let kind = field.field_type.named_kind()?;
            if kind.is_leaf() {
                Some(field.name.clone())
            } else if kind.is_composite() {
                nested_selection(widget, &field.name)
                    .map(|selection| format!("{} {selection}", field.name))
            } else {
                None
            }
        })
        .collect()
}

/// Build `... on WorkItemWidgetX { ... }` for one widget, or `None` if nothing in it is selectable.
pub(crate) fn widget_fragment(snapshot: &SchemaSnapshot, widget: &str, indent: usize) -> Option<String> {
    let type_name = widget_type_name(widget);
    let selections = safe_selections(widget, snapshot.fields_for_type(&type_name));
    if selections.is_empty() {
        tracing::debug!("skipping widget {widget}: {type_name} has no safe fields");
        return None;
    }

    let pad = " ".repeat(indent);
    let mut fragment = format!("{pad}... on {type_name} {{\n");
    for selection in selections {
        fragment.push_str(&format!("{pad}  {selection}\n"));
    }
    fragment.push_str(&format!("{pad}}}"));
    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::types::{TypeKind, TypeRef};
    use crate::test_support::fixture_snapshot;

    #[test]
    fn keeps_leaf_fields_and_known_nested_shapes() {
        let fields = [
            FieldDescriptor::new("assignees", TypeRef::named("UserConnection", TypeKind::Object)),
            FieldDescriptor::new(
                "canInviteMembers",
                TypeRef::non_null(TypeRef::named("Boolean", TypeKind::Scalar)),
            ),
            FieldDescriptor::new("type", TypeRef::named("WorkItemWidgetType", TypeKind::Enum)),
        ];

        assert_eq!(
            safe_selections("ASSIGNEES", &fields),
            ["assignees { nodes { id username } }", "canInviteMembers"]
        );
    }

    #[test]
    fn nested_shapes_are_keyed_by_widget() {
        let fields = [FieldDescriptor::new(
            "assignees",
            TypeRef::named("UserConnection", TypeKind::Object),
        )];

        assert!(safe_selections("PARTICIPANTS", &fields).is_empty());
    }

    #[test]
    fn drops_unknown_composites_and_truncated_types() {
        let truncated = TypeRef {
            name: None,
            kind: TypeKind::List,
            of_type: None,
        };
        let fields = [
            FieldDescriptor::new("lastEditedBy", TypeRef::named("UserCore", TypeKind::Object)),
            FieldDescriptor::new("related", truncated),
            FieldDescriptor::new("filter", TypeRef::named("Filter", TypeKind::InputObject)),
            FieldDescriptor::new("state", TypeRef::named("IssuableState", TypeKind::Enum)),
        ];

        assert_eq!(safe_selections("DESCRIPTION", &fields), ["state"]);
    }

    #[test]
    fn renders_indented_fragment() {
        let fragment = widget_fragment(&fixture_snapshot(), "LABELS", 4).unwrap();
        assert_eq!(
            fragment,
            "    ... on WorkItemWidgetLabels {\n      allowsScopedLabels\n      labels { nodes { id title } }\n    }"
        );
    }

    #[test]
    fn fieldless_widget_has_no_fragment() {
        assert_eq!(widget_fragment(&fixture_snapshot(), "NOTES", 0), None);
        assert_eq!(widget_fragment(&fixture_snapshot(), "NOT_A_WIDGET", 0), None);
    }
}
