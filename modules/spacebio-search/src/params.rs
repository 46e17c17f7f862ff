use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Lenient on input: anything that is not the string "desc" (case-insensitive)
/// means ascending, including null. The AI is told to send "asc" or "desc" but
/// a stray value should not torch an otherwise usable response.
impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        })
    }
}

/// Search parameters as proposed by the AI (or derived by the keyword
/// fallback). Field names in `filters` and `sort_by` are untrusted at this
/// stage; validation against the schema happens in the query builder.
///
/// Every key carries a serde default, so a partial JSON object deserializes
/// into a fully populated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Keys are `field__operator` composites, e.g. `price__lte`.
    #[serde(default)]
    pub filters: BTreeMap<String, Value>,
    #[serde(default)]
    pub search_terms: Vec<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            search_terms: Vec::new(),
            sort_by: None,
            sort_order: SortOrder::Asc,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_object_gets_all_defaults() {
        let params: SearchParams = serde_json::from_str(r#"{"search_terms": ["laptop"]}"#)
            .expect("partial object should deserialize");
        assert!(params.filters.is_empty());
        assert_eq!(params.search_terms, vec!["laptop"]);
        assert_eq!(params.sort_by, None);
        assert_eq!(params.sort_order, SortOrder::Asc);
        assert_eq!(params.limit, 50);
    }

    #[test]
    fn empty_object_equals_default() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SearchParams::default());
    }

    #[test]
    fn sort_order_accepts_desc_and_shrugs_at_the_rest() {
        let desc: SearchParams = serde_json::from_str(r#"{"sort_order": "DESC"}"#).unwrap();
        assert_eq!(desc.sort_order, SortOrder::Desc);

        let null: SearchParams = serde_json::from_str(r#"{"sort_order": null}"#).unwrap();
        assert_eq!(null.sort_order, SortOrder::Asc);

        let junk: SearchParams = serde_json::from_str(r#"{"sort_order": "sideways"}"#).unwrap();
        assert_eq!(junk.sort_order, SortOrder::Asc);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let params: SearchParams =
            serde_json::from_str(r#"{"limit": 10, "reasoning": "because"}"#).unwrap();
        assert_eq!(params.limit, 10);
    }
}
