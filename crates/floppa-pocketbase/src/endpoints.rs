//! PocketBase request types.

use serde::Serialize;

use floppa_core::ExternalId;

/// Sort expression asking the store to shuffle the result set.
pub(crate) const RANDOM_SORT: &str = "@random";

/// Record field holding the external correlation id.
pub(crate) const EXTERNAL_ID_FIELD: &str = "vimId";

/// Query parameters for the records list endpoint.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListRecordsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'static str>,
}

impl ListRecordsQuery {
    /// `?perPage=1&sort=@random`
    pub fn random_one() -> Self {
        Self {
            per_page: Some(1),
            sort: Some(RANDOM_SORT),
            ..Self::default()
        }
    }

    /// `?filter=vimId='{id}'&sort=@random`
    pub fn random_by_external_id(id: &ExternalId) -> Self {
        Self {
            filter: Some(format!("{}={}", EXTERNAL_ID_FIELD, id.filter_literal())),
            sort: Some(RANDOM_SORT),
            ..Self::default()
        }
    }

    /// `?perPage=1`, read only for `totalItems`.
    pub fn count_only() -> Self {
        Self {
            per_page: Some(1),
            ..Self::default()
        }
    }
}

/// Request body for the view counter update.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateViewsRequest {
    pub views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_one_params() {
        let query = serde_json::to_value(ListRecordsQuery::random_one()).unwrap();
        assert_eq!(query, serde_json::json!({"perPage": 1, "sort": "@random"}));
    }

    #[test]
    fn external_id_filter_is_escaped() {
        let id = ExternalId::new("it's").unwrap();
        let query = ListRecordsQuery::random_by_external_id(&id);
        assert_eq!(query.filter.as_deref(), Some(r"vimId='it\'s'"));
        assert_eq!(query.per_page, None);
    }

    #[test]
    fn count_only_has_no_sort() {
        let query = serde_json::to_value(ListRecordsQuery::count_only()).unwrap();
        assert_eq!(query, serde_json::json!({"perPage": 1}));
    }
}
