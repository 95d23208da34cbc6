//! Shared query parameter types for API handlers.

use serde::{Deserialize, Deserializer};
use vaxdemand_core::types::DbId;

/// Optional `?state_id=` filter.
///
/// Used by the livestock summary listing and the report refresh trigger.
/// A blank value means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct StateFilterParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub state_id: Option<DbId>,
}

/// Deserialize an optional id from a query string, treating an empty or
/// whitespace-only value as absent.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_state_id_means_no_filter() {
        let params: StateFilterParams = serde_json::from_value(json!({ "state_id": "" })).unwrap();
        assert_eq!(params.state_id, None);

        let params: StateFilterParams = serde_json::from_value(json!({ "state_id": "  " })).unwrap();
        assert_eq!(params.state_id, None);
    }

    #[test]
    fn missing_state_id_means_no_filter() {
        let params: StateFilterParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.state_id, None);
    }

    #[test]
    fn state_id_parsed_after_trimming() {
        let params: StateFilterParams = serde_json::from_value(json!({ "state_id": " 7 " })).unwrap();
        assert_eq!(params.state_id, Some(7));
    }

    #[test]
    fn non_numeric_state_id_rejected() {
        let err = serde_json::from_value::<StateFilterParams>(json!({ "state_id": "abc" }))
            .unwrap_err();
        assert!(err.to_string().contains("invalid id 'abc'"));
    }
}
