use serde::{Deserialize, Serialize};

use crate::models::example::Attachment;

/// Project scope categories offered in the estimator and used by document
/// extraction. Extraction is instructed to pick from exactly this list.
pub const SCOPE_OPTIONS: [&str; 7] = [
    "App, Admin Dashboard, Website",
    "App, Admin Dashboard",
    "App Only",
    "UI/UX Design (Web)",
    "UI/UX Design (App, Web, Admin Dashboard)",
    "Website / Admin Dashboard",
    "Only Frontend (App, Web, Admin Dashboard)",
];

/// Phase labels shown and edited in the client.
///
/// NOTE: document extraction uses a different, lowercase phase vocabulary
/// (`ingest::prompts::EXTRACTION_PHASES`). The two lists have never been
/// unified; values flow through untranslated. See DESIGN.md.
pub const PHASE_OPTIONS: [&str; 4] = ["UI/UX", "Frontend", "Backend", "Deployment"];

/// Freelance platform the proposal targets. Drives platform-specific
/// framing in the estimation system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Upwork,
    Fiverr,
    Other,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Upwork => write!(f, "Upwork"),
            Platform::Fiverr => write!(f, "Fiverr"),
            Platform::Other => write!(f, "Other"),
        }
    }
}

/// Settings for one estimation request. Transient, supplied per request,
/// and attached by value to the history record it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationConfig {
    pub model: String,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoidance_guidelines: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_format: Option<String>,
    pub platform: Platform,
    pub project_scope: String,
    pub phases: Vec<String>,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        EstimationConfig {
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.7,
            avoidance_guidelines: None,
            quotation_format: None,
            platform: Platform::Upwork,
            project_scope: SCOPE_OPTIONS[0].to_string(),
            phases: vec![PHASE_OPTIONS[0].to_string(), PHASE_OPTIONS[1].to_string()],
        }
    }
}

/// Structured output of one estimation call. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub budget: String,
    pub timeline: String,
    pub reasoning: String,
    pub proposal: String,
    pub breakdown: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl EstimationResult {
    /// Placeholder result substituted when the model answered but the body
    /// could not be parsed against the estimation schema.
    pub fn parse_failure() -> Self {
        EstimationResult {
            budget: "Error".to_string(),
            timeline: "Error".to_string(),
            reasoning: "Failed to parse AI response.".to_string(),
            proposal: "Sorry, I couldn't generate a proposal. Please try again.".to_string(),
            breakdown: Vec::new(),
            risk_factors: Vec::new(),
        }
    }
}

/// One entry in the append-only estimation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationHistory {
    pub id: String,
    pub project_name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub result: EstimationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EstimationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}
