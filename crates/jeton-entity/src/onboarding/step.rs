//! Onboarding step name and status enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of onboarding steps a new tenant admin must complete,
/// in their expected order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "onboarding_step_name", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    /// Create the school and basic tenant settings.
    SchoolSetup,
    /// Fill in the admin's own profile.
    AdminProfile,
    /// Pick a payment plan (or start a trial).
    PaymentPlan,
    /// Review everything and confirm. Submitting this step triggers the
    /// final completion check.
    ReviewConfirm,
}

/// The required steps in completion order.
pub const REQUIRED_STEPS: [StepName; 4] = [
    StepName::SchoolSetup,
    StepName::AdminProfile,
    StepName::PaymentPlan,
    StepName::ReviewConfirm,
];

impl StepName {
    /// Return the step as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchoolSetup => "school_setup",
            Self::AdminProfile => "admin_profile",
            Self::PaymentPlan => "payment_plan",
            Self::ReviewConfirm => "review_confirm",
        }
    }

    /// The onboarding page that collects this step.
    pub fn page_path(&self) -> &'static str {
        match self {
            Self::SchoolSetup => "/onboarding/school-setup",
            Self::AdminProfile => "/onboarding/admin-profile",
            Self::PaymentPlan => "/onboarding/payment-plan",
            Self::ReviewConfirm => "/onboarding/review",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepName {
    type Err = jeton_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school_setup" => Ok(Self::SchoolSetup),
            "admin_profile" => Ok(Self::AdminProfile),
            "payment_plan" => Ok(Self::PaymentPlan),
            "review_confirm" => Ok(Self::ReviewConfirm),
            _ => Err(jeton_core::AppError::validation(format!(
                "Invalid onboarding step: '{s}'"
            ))),
        }
    }
}

/// Completion status of a single onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "onboarding_step_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The step has been started but not confirmed.
    Pending,
    /// The step is complete.
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        for step in REQUIRED_STEPS {
            assert_eq!(step.as_str().parse::<StepName>().unwrap(), step);
        }
    }

    #[test]
    fn test_page_paths_are_onboarding_routes() {
        for step in REQUIRED_STEPS {
            assert!(step.page_path().starts_with("/onboarding/"));
        }
    }
}
