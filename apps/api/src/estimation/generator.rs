//! Estimation generator — assembles the few-shot prompt from the knowledge
//! base and runs one estimation call.
//!
//! Flow: example blocks (text + inline attachment per entry, in order) →
//! new-requirements block → LLM call with the six-field schema. Every call
//! is a fresh request; temperature comes from the submitted config and
//! nothing is cached.

use tracing::{info, warn};

use crate::estimation::prompts::{
    estimation_schema, estimation_system_instruction, example_block, new_requirements_block,
};
use crate::llm_client::{GeminiClient, LlmError, Part};
use crate::models::{EstimationConfig, EstimationResult, ProjectExample};

/// Produces an estimation for `requirements` grounded in the knowledge
/// base. Transport and API failures propagate to the caller; only a
/// received-but-unparseable body is replaced with the fixed error result.
pub async fn generate_estimation(
    llm: &GeminiClient,
    requirements: &str,
    examples: &[ProjectExample],
    config: &EstimationConfig,
) -> Result<EstimationResult, LlmError> {
    let mut parts = Vec::with_capacity(examples.len() * 2 + 1);
    for (index, example) in examples.iter().enumerate() {
        parts.push(Part::text(example_block(index, example)));
        if let Some(attachment) = &example.attachment {
            parts.push(Part::inline_data(
                attachment.mime_type.clone(),
                attachment.data.clone(),
            ));
        }
    }
    parts.push(Part::text(new_requirements_block(requirements)));

    info!(
        examples = examples.len(),
        model = %config.model,
        platform = %config.platform,
        "Running estimation"
    );

    match llm
        .generate_json::<EstimationResult>(
            &config.model,
            &parts,
            &estimation_system_instruction(config),
            Some(config.temperature),
            estimation_schema(),
        )
        .await
    {
        Ok(result) => Ok(result),
        Err(e @ (LlmError::Parse(_) | LlmError::EmptyContent)) => {
            warn!("Estimation response was unusable, substituting error result: {e}");
            Ok(EstimationResult::parse_failure())
        }
        Err(e) => Err(e),
    }
}
