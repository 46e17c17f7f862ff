use std::cmp::Ordering;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::params::SortOrder;
use crate::query::{split_lookup, QuerySpec};

/// A result row: field name to value.
pub type Record = serde_json::Map<String, Value>;

/// Seam to the datastore. The pipeline only ever hands over a validated
/// `QuerySpec`; how it gets executed (SQL, a graph query, an HTTP API) is the
/// adapter's business.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &QuerySpec) -> Result<Vec<Record>>;
}

/// In-memory executor over a fixed set of records. Implements the full lookup
/// vocabulary, so integration tests and the demo binary exercise real query
/// semantics without a database.
pub struct MemoryExecutor {
    records: Vec<Record>,
}

impl MemoryExecutor {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn execute(&self, query: &QuerySpec) -> Result<Vec<Record>> {
        let mut rows: Vec<Record> = self
            .records
            .iter()
            .filter(|r| matches_query(r, query))
            .cloned()
            .collect();

        if let Some((field, order)) = &query.sort {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(field), b.get(field));
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        rows.truncate(query.limit);
        Ok(rows)
    }
}

fn matches_query(record: &Record, query: &QuerySpec) -> bool {
    let filters_ok = query
        .filters
        .iter()
        .all(|(key, expected)| matches_filter(record, key, expected));

    // Each term must be found, case-insensitively, in at least one text field.
    let terms_ok = query.text_search.iter().all(|tm| {
        let needle = tm.term.to_lowercase();
        tm.fields.iter().any(|f| {
            record
                .get(f)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
    });

    filters_ok && terms_ok
}

fn matches_filter(record: &Record, key: &str, expected: &Value) -> bool {
    let (field, operator) = split_lookup(key);
    let actual = record.get(field);

    match operator {
        "exact" => actual == Some(expected),
        "iexact" => match (actual.and_then(Value::as_str), expected.as_str()) {
            (Some(a), Some(e)) => a.eq_ignore_ascii_case(e),
            _ => actual == Some(expected),
        },
        "contains" => str_pair(actual, expected).is_some_and(|(a, e)| a.contains(e)),
        "icontains" => str_pair(actual, expected)
            .is_some_and(|(a, e)| a.to_lowercase().contains(&e.to_lowercase())),
        "startswith" => str_pair(actual, expected).is_some_and(|(a, e)| a.starts_with(e)),
        "endswith" => str_pair(actual, expected).is_some_and(|(a, e)| a.ends_with(e)),
        "gt" => ordered(actual, expected).is_some_and(|o| o == Ordering::Greater),
        "gte" => ordered(actual, expected).is_some_and(|o| o != Ordering::Less),
        "lt" => ordered(actual, expected).is_some_and(|o| o == Ordering::Less),
        "lte" => ordered(actual, expected).is_some_and(|o| o != Ordering::Greater),
        "in" => expected
            .as_array()
            .zip(actual)
            .is_some_and(|(candidates, a)| candidates.contains(a)),
        "isnull" => {
            let want_null = expected.as_bool().unwrap_or(false);
            let is_null = actual.is_none_or(Value::is_null);
            want_null == is_null
        }
        // Unknown operators never reach execution; the query builder drops them.
        _ => false,
    }
}

fn str_pair<'a>(actual: Option<&'a Value>, expected: &'a Value) -> Option<(&'a str, &'a str)> {
    actual.and_then(Value::as_str).zip(expected.as_str())
}

/// Comparison between a record value and a filter operand: numeric when both
/// sides are numbers, lexicographic when both are strings, otherwise
/// incomparable.
fn ordered(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    let actual = actual?;
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(e)) => a.partial_cmp(&e),
        _ => match (actual.as_str(), expected.as_str()) {
            (Some(a), Some(e)) => Some(a.cmp(e)),
            _ => None,
        },
    }
}

/// Sort comparator. Missing values sort first so they surface rather than
/// vanish at the end of a truncated result set.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
    }
}
