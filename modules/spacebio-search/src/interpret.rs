use async_trait::async_trait;
use tracing::{debug, error, warn};

use ai_client::InstructionRunner;

use crate::fallback::fallback_params;
use crate::params::SearchParams;
use crate::parser::parse_response;
use crate::prompt::build_instruction;
use crate::schema::SchemaDescriptor;

/// Turns a prompt into search parameters. Infallible by contract: whatever
/// goes wrong underneath, the caller gets a fully populated `SearchParams`.
#[async_trait]
pub trait Interpret: Send + Sync {
    async fn interpret(&self, prompt: &str, schema: &SchemaDescriptor) -> SearchParams;
}

/// AI-backed interpreter. Builds the instruction, runs it through the
/// transport, and resolves every failure class — timeout, bad status,
/// transport fault, unusable body — to the keyword fallback. Downstream code
/// cannot tell which path produced the parameters, only the logs can.
pub struct AiInterpreter<R> {
    runner: R,
}

impl<R: InstructionRunner> AiInterpreter<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: InstructionRunner> Interpret for AiInterpreter<R> {
    async fn interpret(&self, prompt: &str, schema: &SchemaDescriptor) -> SearchParams {
        let instruction = build_instruction(prompt, schema);

        match self.runner.run(&instruction).await {
            Ok(body) => match parse_response(&body) {
                Some(params) => {
                    debug!(entity = %schema.entity, "interpreter response parsed");
                    params
                }
                None => {
                    warn!(
                        entity = %schema.entity,
                        body_len = body.len(),
                        "no usable JSON in interpreter response, falling back to keywords"
                    );
                    fallback_params(prompt)
                }
            },
            Err(e) => {
                error!(entity = %schema.entity, error = %e, "interpreter call failed, falling back to keywords");
                fallback_params(prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_client::InterpreterError;

    use crate::schema::{FieldDescriptor, FieldType};

    struct CannedRunner(Result<String, InterpreterError>);

    #[async_trait]
    impl InstructionRunner for CannedRunner {
        async fn run(&self, _instruction: &str) -> Result<String, InterpreterError> {
            match &self.0 {
                Ok(body) => Ok(body.clone()),
                Err(InterpreterError::Timeout(s)) => Err(InterpreterError::Timeout(*s)),
                Err(InterpreterError::Status(code)) => Err(InterpreterError::Status(*code)),
                Err(InterpreterError::Transport(_)) => unreachable!("not constructed in tests"),
            }
        }
    }

    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::new(
            "Study",
            vec![FieldDescriptor::new("title", FieldType::Text, "title")],
        )
    }

    #[tokio::test]
    async fn good_body_becomes_parsed_params() {
        let interpreter = AiInterpreter::new(CannedRunner(Ok(
            r#"{"filters": {}, "search_terms": ["bone"], "sort_by": null, "sort_order": "asc", "limit": 20}"#.to_string(),
        )));
        let params = interpreter.interpret("bone loss studies", &schema()).await;
        assert_eq!(params.search_terms, vec!["bone"]);
        assert_eq!(params.limit, 20);
    }

    #[tokio::test]
    async fn timeout_resolves_to_keyword_fallback() {
        let interpreter = AiInterpreter::new(CannedRunner(Err(InterpreterError::Timeout(60))));
        let params = interpreter.interpret("cheap red shoes", &schema()).await;
        assert_eq!(params.search_terms, vec!["cheap", "red", "shoes"]);
        assert!(params.filters.is_empty());
    }

    #[tokio::test]
    async fn http_error_resolves_to_keyword_fallback() {
        let interpreter = AiInterpreter::new(CannedRunner(Err(InterpreterError::Status(
            ai_client::StatusCode::INTERNAL_SERVER_ERROR,
        ))));
        let params = interpreter.interpret("cheap red shoes", &schema()).await;
        assert_eq!(params.search_terms, vec!["cheap", "red", "shoes"]);
    }

    #[tokio::test]
    async fn unparseable_body_resolves_to_keyword_fallback() {
        let interpreter =
            AiInterpreter::new(CannedRunner(Ok("Sorry, I cannot help with that.".to_string())));
        let params = interpreter.interpret("cheap red shoes", &schema()).await;
        assert_eq!(params.search_terms, vec!["cheap", "red", "shoes"]);
    }
}
