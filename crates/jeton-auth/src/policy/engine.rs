//! The policy engine: the sole writer of `users.onboarding_completed` and
//! the single place that decides dashboard access.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use jeton_core::config::onboarding::OnboardingConfig;
use jeton_core::error::AppError;
use jeton_database::repositories::onboarding::OnboardingRepository;
use jeton_database::repositories::subscription::SubscriptionRepository;
use jeton_database::repositories::user::UserRepository;
use jeton_entity::onboarding::step::REQUIRED_STEPS;
use jeton_entity::onboarding::{OnboardingStatus, OnboardingStep, StepName, StepStatus};
use jeton_entity::subscription::{AccessStatus, GrantType};

/// Why dashboard access was denied. Onboarding always wins over billing:
/// a user missing both sees the onboarding reason first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Not all onboarding steps are confirmed complete.
    OnboardingIncomplete,
    /// No active trial or paid grant.
    NoActivePlan,
}

impl DenyReason {
    /// The wire string for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnboardingIncomplete => "onboarding_incomplete",
            Self::NoActivePlan => "no_active_plan",
        }
    }
}

/// The outcome of a dashboard access check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardAccess {
    /// Whether the user may enter the dashboard.
    pub allowed: bool,
    /// The first failing reason, when denied.
    pub reason: Option<DenyReason>,
    /// Where to send the user instead, when denied.
    pub redirect_to: Option<String>,
}

impl DashboardAccess {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            redirect_to: None,
        }
    }

    fn denied(reason: DenyReason, redirect_to: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            redirect_to: Some(redirect_to.into()),
        }
    }
}

/// Determines onboarding state and trial/subscription access.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Onboarding step repository.
    onboarding_repo: Arc<OnboardingRepository>,
    /// Access grant repository.
    subscription_repo: Arc<SubscriptionRepository>,
    /// Onboarding configuration.
    config: OnboardingConfig,
}

impl PolicyEngine {
    /// Creates a new policy engine.
    pub fn new(
        user_repo: Arc<UserRepository>,
        onboarding_repo: Arc<OnboardingRepository>,
        subscription_repo: Arc<SubscriptionRepository>,
        config: OnboardingConfig,
    ) -> Self {
        Self {
            user_repo,
            onboarding_repo,
            subscription_repo,
            config,
        }
    }

    /// Reports the user's onboarding state.
    ///
    /// `completed` comes from the authoritative user flag; the missing-step
    /// list is derived from step rows. The two are not cross-checked here —
    /// once the flag is set, step edits no longer matter.
    pub async fn get_onboarding_status(&self, user_id: Uuid) -> Result<OnboardingStatus, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let completed_steps = self.onboarding_repo.completed_steps(user_id).await?;
        let missing_steps = missing_steps(&completed_steps);

        Ok(OnboardingStatus {
            completed: user.onboarding_completed,
            current_step: missing_steps.first().copied(),
            missing_steps,
        })
    }

    /// Upserts one onboarding step and runs its side effects.
    ///
    /// - `school_setup` creates the school and assigns the user to it.
    /// - `payment_plan` with `{"plan": "trial"}` starts a trial grant.
    /// - `review_confirm` attempts final completion; a completion failure
    ///   is logged and the step submission still succeeds, so the client
    ///   can retry via `POST /api/onboarding/complete`.
    pub async fn update_step(
        &self,
        user_id: Uuid,
        step_name: StepName,
        data: serde_json::Value,
    ) -> Result<OnboardingStep, AppError> {
        match step_name {
            StepName::SchoolSetup => {
                let school_name = data
                    .get("name")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::validation("school_setup requires a non-empty 'name'")
                    })?;
                let school = self.user_repo.assign_school(user_id, school_name).await?;
                info!(user_id = %user_id, school_id = %school.id, "School created");
            }
            StepName::PaymentPlan => {
                let plan = data.get("plan").and_then(|v| v.as_str()).ok_or_else(|| {
                    AppError::validation("payment_plan requires a 'plan' of 'trial' or 'paid'")
                })?;
                match plan {
                    "trial" => {
                        self.start_trial(user_id).await?;
                    }
                    "paid" => {
                        // Checkout happens out-of-band; the grant is written
                        // by the billing integration once payment settles.
                    }
                    other => {
                        return Err(AppError::validation(format!(
                            "Unknown plan '{other}'; expected 'trial' or 'paid'"
                        )));
                    }
                }
            }
            StepName::AdminProfile | StepName::ReviewConfirm => {}
        }

        let step = self
            .onboarding_repo
            .upsert_step(user_id, step_name, StepStatus::Completed, &data)
            .await?;

        if step_name == StepName::ReviewConfirm {
            if let Err(e) = self.mark_onboarding_complete(user_id).await {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Final completion check failed after review_confirm"
                );
            }
        }

        Ok(step)
    }

    /// Starts a trial grant for the user, replacing any prior grant.
    pub async fn start_trial(&self, user_id: Uuid) -> Result<(), AppError> {
        let now = Utc::now();
        let end = now + Duration::days(self.config.trial_days as i64);
        self.subscription_repo
            .replace_grant(user_id, GrantType::Trial, now, end)
            .await?;
        info!(user_id = %user_id, trial_days = self.config.trial_days, "Trial started");
        Ok(())
    }

    /// Finalizes onboarding once every required step is complete and an
    /// active grant exists.
    ///
    /// Idempotent: repeated calls after the flag is set are no-ops and the
    /// completion timestamp never moves.
    pub async fn mark_onboarding_complete(&self, user_id: Uuid) -> Result<(), AppError> {
        let completed_steps = self.onboarding_repo.completed_steps(user_id).await?;
        let missing = missing_steps(&completed_steps);
        if !missing.is_empty() {
            return Err(AppError::incomplete_prerequisites(format!(
                "Onboarding steps not complete: {}",
                missing
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        if self
            .subscription_repo
            .find_active_by_user(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::incomplete_prerequisites(
                "No active trial or subscription",
            ));
        }

        let flipped = self.user_repo.set_onboarding_completed(user_id).await?;
        if flipped {
            info!(user_id = %user_id, "Onboarding completed");
        }
        Ok(())
    }

    /// Reports whether the user holds an active trial or paid grant.
    pub async fn has_active_access(&self, user_id: Uuid) -> Result<AccessStatus, AppError> {
        let Some(grant) = self.subscription_repo.find_active_by_user(user_id).await? else {
            return Ok(AccessStatus::none());
        };

        Ok(AccessStatus {
            has_access: grant.is_current(),
            grant_type: Some(grant.grant_type),
            days_remaining: Some(grant.days_remaining()),
        })
    }

    /// Decides dashboard access: onboarding complete AND active grant.
    pub async fn can_access_dashboard(&self, user_id: Uuid) -> Result<DashboardAccess, AppError> {
        let status = self.get_onboarding_status(user_id).await?;
        if !status.completed {
            let redirect = status
                .current_step
                .map(|step| step.page_path())
                .unwrap_or(StepName::ReviewConfirm.page_path());
            return Ok(DashboardAccess::denied(
                DenyReason::OnboardingIncomplete,
                redirect,
            ));
        }

        let access = self.has_active_access(user_id).await?;
        if !access.has_access {
            return Ok(DashboardAccess::denied(
                DenyReason::NoActivePlan,
                "/payment/select",
            ));
        }

        Ok(DashboardAccess::allowed())
    }
}

/// The required steps not yet completed, in flow order.
fn missing_steps(completed: &[StepName]) -> Vec<StepName> {
    REQUIRED_STEPS
        .iter()
        .filter(|step| !completed.contains(step))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_steps_in_flow_order() {
        let missing = missing_steps(&[StepName::AdminProfile]);
        assert_eq!(
            missing,
            vec![
                StepName::SchoolSetup,
                StepName::PaymentPlan,
                StepName::ReviewConfirm
            ]
        );
    }

    #[test]
    fn test_no_missing_steps_when_all_complete() {
        assert!(missing_steps(&REQUIRED_STEPS).is_empty());
    }

    #[test]
    fn test_deny_reason_wire_strings() {
        assert_eq!(
            DenyReason::OnboardingIncomplete.as_str(),
            "onboarding_incomplete"
        );
        assert_eq!(DenyReason::NoActivePlan.as_str(), "no_active_plan");
    }
}
