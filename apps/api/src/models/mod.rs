pub mod estimation;
pub mod example;

pub use estimation::{
    EstimationConfig, EstimationHistory, EstimationResult, Platform, PHASE_OPTIONS, SCOPE_OPTIONS,
};
pub use example::{Attachment, ProjectExample};
