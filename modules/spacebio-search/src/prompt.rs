use std::fmt::Write;

use crate::schema::SchemaDescriptor;

/// Render the instruction document sent to the interpretation service.
///
/// The operator menu and the "ONLY valid JSON, five keys" contract are the
/// trust boundary with the AI: the query builder later rejects anything
/// outside this vocabulary, so the prompt and the validator must agree
/// (see `LOOKUP_OPERATORS` in the query module).
pub fn build_instruction(prompt: &str, schema: &SchemaDescriptor) -> String {
    let mut fields = String::new();
    for field in &schema.fields {
        let _ = writeln!(
            fields,
            "{} ({}): {}",
            field.name, field.field_type, field.description
        );
    }

    format!(
        r#"You are a database search query interpreter.

SCHEMA:
Entity: {entity}
Fields:
{fields}
USER SEARCH QUERY:
{prompt}

YOUR TASK:
Convert the user's query into a JSON object with these fields:
- filters: object of field filters keyed "field__operator" (e.g. {{"price__lte": 100, "name__icontains": "test"}})
- search_terms: list of keywords to search across text fields
- sort_by: field name to sort by (or null)
- sort_order: "asc" or "desc"
- limit: maximum number of results (default 50)

AVAILABLE LOOKUP OPERATORS:
- exact: exact match
- iexact: case-insensitive exact match
- contains/icontains: contains substring
- gt/gte/lt/lte: greater than, greater or equal, less than, less or equal
- startswith/endswith: string starts/ends with
- in: value in list
- isnull: is null (true/false)

RESPONSE FORMAT:
Return ONLY valid JSON with exactly those five keys, no other text. Example:
{{"filters": {{"category__iexact": "electronics", "price__lt": 500}}, "search_terms": ["laptop"], "sort_by": "price", "sort_order": "asc", "limit": 50}}

Now convert the user query above into the JSON format.
"#,
        entity = schema.entity,
        fields = fields,
        prompt = prompt,
    )
}
