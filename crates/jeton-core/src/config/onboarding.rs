//! Onboarding flow configuration.

use serde::{Deserialize, Serialize};

/// Onboarding and trial configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    /// Length of the free trial in days.
    #[serde(default = "default_trial_days")]
    pub trial_days: u64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            trial_days: default_trial_days(),
        }
    }
}

fn default_trial_days() -> u64 {
    14
}
