use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use spacebio_common::SearchError;

use crate::executor::{QueryExecutor, Record};
use crate::interpret::Interpret;
use crate::params::SearchParams;
use crate::query::build_query;
use crate::schema::SchemaDescriptor;

/// Maps entity names to schema descriptors. This is the explicit stand-in for
/// live data-model introspection: the caller boundary registers descriptors
/// once, the pipeline resolves a fresh copy per request.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: SchemaDescriptor) {
        self.schemas.insert(schema.entity.clone(), schema);
    }

    pub fn resolve(&self, entity: &str) -> Option<SchemaDescriptor> {
        self.schemas.get(entity).cloned()
    }
}

/// What the caller gets back: the rows, plus enough context to see how the
/// prompt was interpreted.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Record>,
    pub count: usize,
    pub search_params: SearchParams,
    pub query: String,
}

/// Front door of the pipeline. Holds no mutable state, so one instance can
/// serve concurrent callers behind an `Arc`.
pub struct SearchService<I, E> {
    interpreter: I,
    executor: E,
    registry: SchemaRegistry,
}

impl<I: Interpret, E: QueryExecutor> SearchService<I, E> {
    pub fn new(interpreter: I, executor: E, registry: SchemaRegistry) -> Self {
        Self {
            interpreter,
            executor,
            registry,
        }
    }

    /// Run one search. The only domain error that can come out of here is
    /// `EntityNotFound`; interpretation and validation failures degrade to
    /// keyword search inside the pipeline and still produce a response.
    pub async fn search(&self, prompt: &str, entity: &str) -> Result<SearchResponse, SearchError> {
        let schema = self
            .registry
            .resolve(entity)
            .ok_or_else(|| SearchError::EntityNotFound {
                entity: entity.to_string(),
            })?;

        info!(entity, prompt, "search request");

        let search_params = self.interpreter.interpret(prompt, &schema).await;
        let query = build_query(&search_params, &schema);

        let results = self
            .executor
            .execute(&query)
            .await
            .map_err(SearchError::Internal)?;

        info!(
            entity,
            count = results.len(),
            dropped = query.dropped_fields.len(),
            "search complete"
        );

        Ok(SearchResponse {
            count: results.len(),
            results,
            search_params,
            query: prompt.to_string(),
        })
    }
}
