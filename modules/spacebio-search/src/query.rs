use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::params::{SearchParams, SortOrder, DEFAULT_LIMIT};
use crate::schema::SchemaDescriptor;

/// The lookup vocabulary the AI is allowed to use in filter keys. Advertised
/// in the instruction prompt and enforced here.
pub const LOOKUP_OPERATORS: [&str; 12] = [
    "exact",
    "iexact",
    "contains",
    "icontains",
    "gt",
    "gte",
    "lt",
    "lte",
    "startswith",
    "endswith",
    "in",
    "isnull",
];

/// One conjunct of the text-search predicate: `term` must appear
/// case-insensitively in at least one of `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermMatch {
    pub term: String,
    pub fields: Vec<String>,
}

/// Schema-validated query, safe to hand to a data executor.
///
/// Invariant: every field name in `filters` keys and in `sort` is a member of
/// the schema this value was built against. Entries that failed validation
/// are listed in `dropped_fields` so callers and tests can see what was
/// discarded.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySpec {
    pub filters: BTreeMap<String, Value>,
    /// ANDed term matches; empty means "match everything".
    pub text_search: Vec<TermMatch>,
    pub sort: Option<(String, SortOrder)>,
    pub limit: usize,
    pub dropped_fields: Vec<String>,
}

/// Validate AI-proposed parameters against the schema and compose the query.
///
/// Invalid entries are dropped with a warning rather than failing the request;
/// a degraded query that runs beats an error the user cannot act on.
pub fn build_query(params: &SearchParams, schema: &SchemaDescriptor) -> QuerySpec {
    let mut filters = BTreeMap::new();
    let mut dropped_fields = Vec::new();

    for (key, value) in &params.filters {
        let (field, operator) = split_lookup(key);

        if !schema.has_field(field) {
            warn!(entity = %schema.entity, field, "dropping filter on unknown field");
            dropped_fields.push(key.clone());
            continue;
        }
        if !LOOKUP_OPERATORS.contains(&operator) {
            warn!(entity = %schema.entity, field, operator, "dropping filter with unknown operator");
            dropped_fields.push(key.clone());
            continue;
        }
        filters.insert(key.clone(), value.clone());
    }

    let text_fields: Vec<String> = schema.text_fields().map(str::to_string).collect();
    let text_search = if text_fields.is_empty() {
        Vec::new()
    } else {
        params
            .search_terms
            .iter()
            .filter(|term| !term.trim().is_empty())
            .map(|term| TermMatch {
                term: term.clone(),
                fields: text_fields.clone(),
            })
            .collect()
    };

    let sort = match params.sort_by.as_deref() {
        Some(field) if schema.has_field(field) => Some((field.to_string(), params.sort_order)),
        Some(field) => {
            warn!(entity = %schema.entity, field, "dropping sort on unknown field");
            dropped_fields.push(field.to_string());
            None
        }
        None => None,
    };

    let limit = if params.limit > 0 {
        params.limit as usize
    } else {
        warn!(limit = params.limit, "non-positive limit, using default");
        DEFAULT_LIMIT as usize
    };

    QuerySpec {
        filters,
        text_search,
        sort,
        limit,
        dropped_fields,
    }
}

/// Split a `field__operator` composite key. A bare field name means exact
/// match. Only the first `__` separates; deeper paths stay in the operator
/// position and get rejected by the operator check.
pub fn split_lookup(key: &str) -> (&str, &str) {
    match key.split_once("__") {
        Some((field, operator)) => (field, operator),
        None => (key, "exact"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::schema::{FieldDescriptor, FieldType};

    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::new(
            "Item",
            vec![
                FieldDescriptor::new("name", FieldType::Text, "display name"),
                FieldDescriptor::new("category", FieldType::Text, "category slug"),
                FieldDescriptor::new("price", FieldType::Number, "unit price"),
            ],
        )
    }

    fn params_with_filters(filters: &[(&str, Value)]) -> SearchParams {
        SearchParams {
            filters: filters
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            ..SearchParams::default()
        }
    }

    #[test]
    fn keeps_filters_on_known_fields() {
        let params = params_with_filters(&[
            ("price__lte", json!(100)),
            ("name__icontains", json!("kit")),
        ]);
        let query = build_query(&params, &schema());
        assert_eq!(query.filters.len(), 2);
        assert!(query.dropped_fields.is_empty());
    }

    #[test]
    fn drops_filters_on_unknown_fields() {
        let params = params_with_filters(&[
            ("price__lte", json!(100)),
            ("weight__gt", json!(5)),
        ]);
        let query = build_query(&params, &schema());
        assert!(query.filters.contains_key("price__lte"));
        assert!(!query.filters.contains_key("weight__gt"));
        assert_eq!(query.dropped_fields, vec!["weight__gt"]);
    }

    #[test]
    fn bare_field_name_means_exact() {
        assert_eq!(split_lookup("price"), ("price", "exact"));
        assert_eq!(split_lookup("price__lte"), ("price", "lte"));
        assert_eq!(split_lookup("a__b__c"), ("a", "b__c"));

        let params = params_with_filters(&[("category", json!("plants"))]);
        let query = build_query(&params, &schema());
        assert!(query.filters.contains_key("category"));
    }

    #[test]
    fn drops_operators_outside_the_menu() {
        let params = params_with_filters(&[("price__regex", json!(".*"))]);
        let query = build_query(&params, &schema());
        assert!(query.filters.is_empty());
        assert_eq!(query.dropped_fields, vec!["price__regex"]);
    }

    #[test]
    fn every_query_field_is_a_schema_member() {
        let params = SearchParams {
            filters: [
                ("price__gte".to_string(), json!(1)),
                ("bogus__lt".to_string(), json!(2)),
                ("name".to_string(), json!("x")),
            ]
            .into(),
            sort_by: Some("also_bogus".to_string()),
            ..SearchParams::default()
        };
        let query = build_query(&params, &schema());
        let schema = schema();
        for key in query.filters.keys() {
            let (field, _) = split_lookup(key);
            assert!(schema.has_field(field));
        }
        assert!(query.sort.is_none());
    }

    #[test]
    fn text_search_spans_text_fields_only() {
        let params = SearchParams {
            search_terms: vec!["cheap".to_string(), "red".to_string()],
            ..SearchParams::default()
        };
        let query = build_query(&params, &schema());
        assert_eq!(query.text_search.len(), 2);
        for tm in &query.text_search {
            assert_eq!(tm.fields, vec!["name", "category"]);
        }
    }

    #[test]
    fn empty_terms_mean_match_everything() {
        let query = build_query(&SearchParams::default(), &schema());
        assert!(query.text_search.is_empty());
    }

    #[test]
    fn invalid_sort_is_dropped_not_fatal() {
        let params = SearchParams {
            sort_by: Some("nonexistent_field".to_string()),
            ..SearchParams::default()
        };
        let query = build_query(&params, &schema());
        assert!(query.sort.is_none());
        assert_eq!(query.dropped_fields, vec!["nonexistent_field"]);
    }

    #[test]
    fn valid_sort_carries_direction() {
        let params = SearchParams {
            sort_by: Some("price".to_string()),
            sort_order: SortOrder::Desc,
            ..SearchParams::default()
        };
        let query = build_query(&params, &schema());
        assert_eq!(query.sort, Some(("price".to_string(), SortOrder::Desc)));
    }

    #[test]
    fn non_positive_limit_clamps_to_default() {
        for bad in [0, -5] {
            let params = SearchParams {
                limit: bad,
                ..SearchParams::default()
            };
            let query = build_query(&params, &schema());
            assert_eq!(query.limit, 50);
        }
    }
}
