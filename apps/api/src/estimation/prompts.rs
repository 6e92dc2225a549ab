use serde_json::{json, Value};

use crate::models::{EstimationConfig, Platform, ProjectExample};

const FIVERR_NOTE: &str =
    "Note: On Fiverr, focus on tier-based value or competitive quick-delivery pricing.";
const UPWORK_NOTE: &str =
    "Note: On Upwork, focus on high-quality delivery, expertise, and long-term value.";

/// System instruction for one estimation call. Carries the platform, scope
/// and phase context plus platform-conditional framing; `Other` gets none.
pub fn estimation_system_instruction(config: &EstimationConfig) -> String {
    let phases = config.phases.join(", ");
    let phases_line = if config.phases.is_empty() {
        String::new()
    } else {
        format!("\nPROJECT PHASES INVOLVED: {phases}")
    };
    let platform_note = match config.platform {
        Platform::Upwork => UPWORK_NOTE,
        Platform::Fiverr => FIVERR_NOTE,
        Platform::Other => "",
    };

    let mut system = format!(
        "You are an elite Sales Strategist for Freelancers.\n\
         CONTEXT:\n\
         - Platform: {platform}\n\
         - Project Scope Category: {scope}{phases_line}\n\n\
         TASK: Analyze the requirements and provide an estimation.\n\
         {platform_note}\n\n\
         Phases involved: {phases}. Ensure the breakdown and reasoning specifically account for these phases.\n\n\
         Use the provided \"PAST SUCCESSFUL PROJECTS\" (including any visual/document attachments provided) \
         to align with the freelancer's established pricing logic and proposal style.\n",
        platform = config.platform,
        scope = config.project_scope,
    );

    if let Some(avoid) = config
        .avoidance_guidelines
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        system.push_str(&format!("\nAVOID THE FOLLOWING: {avoid}\n"));
    }
    if let Some(format_hint) = config
        .quotation_format
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        system.push_str(&format!("\nQUOTATION FORMAT PREFERENCE: {format_hint}\n"));
    }

    system.push_str(
        "\nOutput JSON with:\n\
         1. 'budget': Range/estimate.\n\
         2. 'timeline': Expected delivery.\n\
         3. 'reasoning': Why this price for this platform/scope/phases?\n\
         4. 'proposal': Ready-to-send text.\n\
         5. 'breakdown': Array of steps.\n\
         6. 'riskFactors': Array of potential issues.",
    );
    system
}

/// Few-shot text block for one knowledge-base entry. The attachment note
/// points the model at the inline-data part that follows this block.
pub fn example_block(index: usize, example: &ProjectExample) -> String {
    let attachment_note = example
        .attachment
        .as_ref()
        .map(|a| format!("\n(Attachment included: {})", a.name))
        .unwrap_or_default();

    format!(
        "PAST SUCCESSFUL PROJECT #{n}:\n\
         Title: {title}\n\
         Requirements: {requirements}\n\
         Budget: {budget}\n\
         Timeline: {timeline}{attachment_note}",
        n = index + 1,
        title = example.title,
        requirements = example.requirements,
        budget = example.budget,
        timeline = example.timeline,
    )
}

/// Closing block carrying the new requirements, always the last part.
pub fn new_requirements_block(requirements: &str) -> String {
    format!(
        "NEW PROJECT REQUIREMENTS:\n{requirements}\n\n\
         Generate the estimation now based on the specified scope, phases, and historical wins."
    )
}

/// Response schema for estimation: all six fields required.
pub fn estimation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "budget": { "type": "STRING" },
            "timeline": { "type": "STRING" },
            "reasoning": { "type": "STRING" },
            "proposal": { "type": "STRING" },
            "breakdown": { "type": "ARRAY", "items": { "type": "STRING" } },
            "riskFactors": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["budget", "timeline", "reasoning", "proposal", "breakdown", "riskFactors"]
    })
}
