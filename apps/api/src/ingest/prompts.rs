use serde_json::{json, Value};

use crate::models::SCOPE_OPTIONS;

/// Model used for document extraction. Estimation uses the model named in
/// the request config; extraction is pinned to a cheap vision-capable one.
pub const EXTRACTION_MODEL: &str = "gemini-2.0-flash-lite-preview-02-05";

/// Phase vocabulary the extraction prompt offers the model. Deliberately
/// not the capitalized list the client displays (`models::PHASE_OPTIONS`);
/// extracted values pass through untranslated. See DESIGN.md.
pub const EXTRACTION_PHASES: [&str; 4] =
    ["UI/UX design", "frontend", "backend/api integration", "deployment"];

pub const EXTRACTION_USER_PROMPT: &str =
    "Analyze this document and extract the project details, including scope and phases.";

/// System instruction for document extraction. Embeds the closed scope and
/// phase enumerations so the model picks from them verbatim.
pub fn extraction_system_instruction() -> String {
    let scopes = SCOPE_OPTIONS
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let phases = EXTRACTION_PHASES
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an expert document analyzer. Extract project information from the provided file.\n\
         Return a JSON object with:\n\
         - 'title': A short catchy title for the project.\n\
         - 'requirements': A detailed summary of what needs to be built.\n\
         - 'budget': Any mentioned price/budget (if found).\n\
         - 'timeline': Any mentioned duration/deadline (if found).\n\
         - 'projectScope': Choose the most relevant category from: [{scopes}].\n\
         - 'phases': Identify applicable phases from [{phases}].\n\n\
         If fields are not found, return empty strings for them. Focus on high accuracy."
    )
}

/// Response schema for extraction: title/budget/timeline are best-effort,
/// requirements/scope/phases are required.
pub fn extraction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "requirements": { "type": "STRING" },
            "budget": { "type": "STRING" },
            "timeline": { "type": "STRING" },
            "projectScope": { "type": "STRING" },
            "phases": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["requirements", "projectScope", "phases"]
    })
}
