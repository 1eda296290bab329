//! Mapping between widget enum values and their GraphQL object type names

/// Prefix shared by every widget object type, e.g. `WorkItemWidgetAssignees`
pub const WIDGET_TYPE_PREFIX: &str = "WorkItemWidget";

/// Convert a `SCREAMING_SNAKE` widget enum value into its object type name.
///
/// `ASSIGNEES` becomes `WorkItemWidgetAssignees` and `LINKED_ITEMS` becomes
/// `WorkItemWidgetLinkedItems`. Empty segments from doubled or trailing
/// underscores are dropped.
pub fn widget_type_name(widget: &str) -> String {
    let mut name = String::with_capacity(WIDGET_TYPE_PREFIX.len() + widget.len());
    name.push_str(WIDGET_TYPE_PREFIX);
    for segment in widget.split('_').filter(|segment| !segment.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.extend(chars.flat_map(char::to_lowercase));
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::widget_type_name;
    use rstest::rstest;

    #[rstest]
    #[case("ASSIGNEES", "WorkItemWidgetAssignees")]
    #[case("LABELS", "WorkItemWidgetLabels")]
    #[case("MILESTONE", "WorkItemWidgetMilestone")]
    #[case("START_AND_DUE_DATE", "WorkItemWidgetStartAndDueDate")]
    #[case("LINKED_ITEMS", "WorkItemWidgetLinkedItems")]
    #[case("CRM_CONTACTS", "WorkItemWidgetCrmContacts")]
    #[case("EMAIL_PARTICIPANTS", "WorkItemWidgetEmailParticipants")]
    #[case("TIME_TRACKING", "WorkItemWidgetTimeTracking")]
    #[case("DESIGNS", "WorkItemWidgetDesigns")]
    fn maps_enum_values_to_type_names(#[case] widget: &str, #[case] expected: &str) {
        assert_eq!(widget_type_name(widget), expected);
    }

    #[rstest]
    #[case("HEALTH__STATUS", "WorkItemWidgetHealthStatus")]
    #[case("_NOTES_", "WorkItemWidgetNotes")]
    #[case("", "WorkItemWidget")]
    fn ignores_empty_segments(#[case] widget: &str, #[case] expected: &str) {
        assert_eq!(widget_type_name(widget), expected);
    }

    #[test]
    fn lowercase_input_is_normalized() {
        assert_eq!(widget_type_name("notes"), "WorkItemWidgetNotes");
    }
}
