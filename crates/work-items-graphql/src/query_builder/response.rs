use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `data` returned by the work item queries
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorkItemsData {
    pub namespace: Option<Namespace>,
}

impl WorkItemsData {
    pub fn work_items(&self) -> &[WorkItem] {
        self.connection()
            .map(|connection| connection.nodes.as_slice())
            .unwrap_or_default()
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.connection().map(|connection| &connection.page_info)
    }

    fn connection(&self) -> Option<&WorkItemConnection> {
        self.namespace.as_ref()?.work_items.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub work_items: Option<WorkItemConnection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemConnection {
    #[serde(default)]
    pub nodes: Vec<WorkItem>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub iid: String,
    pub title: String,
    pub state: String,
    pub work_item_type: WorkItemTypeRef,
    pub web_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Widget objects as returned; their shape depends on what the backend supports
    #[serde(default)]
    pub widgets: Vec<Map<String, Value>>,
}

impl WorkItem {
    /// The widget object whose `type` discriminator is `widget`
    pub fn widget(&self, widget: &str) -> Option<&Map<String, Value>> {
        self.widgets
            .iter()
            .find(|object| object.get("type").and_then(Value::as_str) == Some(widget))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkItemTypeRef {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> WorkItemsData {
        serde_json::from_value(json!({
            "namespace": {
                "workItems": {
                    "nodes": [{
                        "id": "gid://gitlab/WorkItem/1",
                        "iid": "1",
                        "title": "Flaky pipeline",
                        "state": "OPEN",
                        "workItemType": { "id": "gid://gitlab/WorkItems::Type/1", "name": "Issue" },
                        "webUrl": "https://gitlab.example.com/group/project/-/work_items/1",
                        "createdAt": "2024-01-01T00:00:00Z",
                        "updatedAt": "2024-01-02T00:00:00Z",
                        "widgets": [
                            { "type": "ASSIGNEES", "assignees": { "nodes": [{ "id": "gid://gitlab/User/1", "username": "root" }] } },
                            { "type": "NOTES" }
                        ]
                    }],
                    "pageInfo": { "hasNextPage": true, "endCursor": "eyJpZCI6IjEifQ" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn finds_widget_by_discriminator() {
        let data = data();
        let item = &data.work_items()[0];

        let assignees = item.widget("ASSIGNEES").unwrap();
        assert_eq!(assignees["assignees"]["nodes"][0]["username"], "root");
        assert!(item.widget("LABELS").is_none());
    }

    #[test]
    fn exposes_page_info() {
        assert_eq!(
            data().page_info(),
            Some(&PageInfo {
                has_next_page: true,
                end_cursor: Some("eyJpZCI6IjEifQ".to_string()),
            })
        );
    }

    #[test]
    fn missing_namespace_has_no_work_items() {
        let data: WorkItemsData = serde_json::from_value(json!({ "namespace": null })).unwrap();

        assert!(data.work_items().is_empty());
        assert!(data.page_info().is_none());
    }
}
