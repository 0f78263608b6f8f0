//! Common traits for TFE resources

use serde::Deserialize;

use crate::hcp::pagination::{Page, Pagination};

/// Common trait for named TFE resources (organizations, projects, workspaces, teams)
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Keep only the resources whose name equals `name` exactly
///
/// Server-side `search` is a substring match; this narrows it down.
pub fn exact_name_matches<T: TfeResource>(items: Vec<T>, name: &str) -> Vec<T> {
    items.into_iter().filter(|item| item.name() == name).collect()
}

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Trait for API responses that contain paginated data
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;

    /// Get reference to pagination metadata
    fn meta(&self) -> Option<&PaginationMeta>;

    /// Pagination of this response; a response without meta is a single page
    fn pagination(&self) -> Pagination {
        self.meta()
            .and_then(|m| m.pagination)
            .unwrap_or_else(Pagination::single)
    }

    fn into_page(self) -> Page<T>
    where
        Self: Sized,
    {
        let pagination = self.pagination();
        Page::new(self.into_data(), pagination)
    }
}

/// Generic API list response wrapper for paginated endpoints
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
    /// Side-loaded resources requested with `include=`
    #[serde(default)]
    pub included: Vec<serde_json::Value>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}

/// Single-resource document (`{"data": {...}, "included": [...]}`)
#[derive(Deserialize, Debug)]
pub struct ApiDocument<T> {
    pub data: T,
    #[serde(default)]
    pub included: Vec<serde_json::Value>,
}

/// Reference to another resource inside `relationships`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RelationshipData {
    pub id: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
}

/// `{"data": {...}}` wrapper of a to-one relationship
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

impl Relationship {
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// Side-loaded resources of one JSON:API type
pub fn included_of_type<'a>(
    included: &'a [serde_json::Value],
    resource_type: &'a str,
) -> impl Iterator<Item = &'a serde_json::Value> + 'a {
    included
        .iter()
        .filter(move |item| item["type"].as_str() == Some(resource_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl TfeResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn res(id: &str, name: &str) -> TestResource {
        TestResource {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let resource = res("prj-123", "network");
        assert!(resource.matches("prj-123"));
        assert!(resource.matches("network"));
        assert!(!resource.matches("other"));
    }

    #[test]
    fn test_exact_name_matches() {
        let items = vec![res("1", "app"), res("2", "app-prod"), res("3", "my-app")];
        let matched = exact_name_matches(items, "app");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }

    #[test]
    fn test_api_list_response_page() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}],
                "meta": {
                    "pagination": {
                        "current-page": 1,
                        "next-page": 2,
                        "total-pages": 3,
                        "total-count": 5
                    }
                }
            }))
            .unwrap();
        let page = response.into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination, Pagination::new(1, 2, 3).with_total(5));
    }

    #[test]
    fn test_api_list_response_without_meta_is_single_page() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}]
            }))
            .unwrap();
        assert!(response.meta().is_none());
        assert!(response.included.is_empty());
        assert_eq!(response.pagination(), Pagination::single());
    }

    #[test]
    fn test_included_of_type() {
        let included = vec![
            serde_json::json!({"id": "run-1", "type": "runs"}),
            serde_json::json!({"id": "etb-1", "type": "effective-tag-bindings"}),
            serde_json::json!({"id": "run-2", "type": "runs"}),
        ];
        let ids: Vec<&str> = included_of_type(&included, "runs")
            .filter_map(|v| v["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["run-1", "run-2"]);
    }

    #[test]
    fn test_relationship_id() {
        let rel: Relationship = serde_json::from_value(serde_json::json!({
            "data": {"id": "run-1", "type": "runs"}
        }))
        .unwrap();
        assert_eq!(rel.id(), Some("run-1"));

        let empty: Relationship = serde_json::from_value(serde_json::json!({"data": null})).unwrap();
        assert_eq!(empty.id(), None);
    }
}
