//! Natural-language search over a structured dataset.
//!
//! A caller hands in a free-text prompt and an entity name. The pipeline asks
//! an external AI service to interpret the prompt against the entity's schema,
//! defends against whatever the AI sends back, and composes a schema-validated
//! query for the data executor. If the AI is slow, down, or talking nonsense,
//! the request still completes via a deterministic keyword fallback.

pub mod executor;
pub mod fallback;
pub mod interpret;
pub mod params;
pub mod parser;
pub mod prompt;
pub mod query;
pub mod schema;
pub mod service;

pub use executor::{MemoryExecutor, QueryExecutor, Record};
pub use fallback::fallback_params;
pub use interpret::{AiInterpreter, Interpret};
pub use params::{SearchParams, SortOrder};
pub use parser::parse_response;
pub use prompt::build_instruction;
pub use query::{build_query, QuerySpec, TermMatch, LOOKUP_OPERATORS};
pub use schema::{FieldDescriptor, FieldType, SchemaDescriptor};
pub use service::{SchemaRegistry, SearchResponse, SearchService};
