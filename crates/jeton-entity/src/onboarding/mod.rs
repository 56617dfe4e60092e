//! Onboarding step entities.

pub mod model;
pub mod step;

pub use model::{OnboardingStatus, OnboardingStep};
pub use step::{StepName, StepStatus};
