//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use jeton_auth::credentials::CredentialVerifier;
use jeton_auth::password::{PasswordHasher, PasswordValidator};
use jeton_auth::policy::PolicyEngine;
use jeton_auth::session::{SessionManager, SessionStore};
use jeton_auth::token::{TokenDecoder, TokenEncoder, TokenService};
use jeton_core::config::AppConfig;

use jeton_database::repositories::onboarding::OnboardingRepository;
use jeton_database::repositories::session::SessionRepository;
use jeton_database::repositories::subscription::SubscriptionRepository;
use jeton_database::repositories::user::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Credential verification (shared by both auth paths).
    pub verifier: CredentialVerifier,
    /// Session persistence.
    pub session_store: Arc<SessionStore>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Onboarding/access policy engine.
    pub policy: Arc<PolicyEngine>,
    /// Legacy token issuance and rotation.
    pub token_service: Arc<TokenService>,
    /// Password hasher (Argon2id).
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy checks for new passwords.
    pub password_validator: Arc<PasswordValidator>,
}

impl AppState {
    /// Wires repositories and services over an established pool.
    pub fn initialize(config: AppConfig, db_pool: PgPool) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
        let onboarding_repo = Arc::new(OnboardingRepository::new(db_pool.clone()));
        let subscription_repo = Arc::new(SubscriptionRepository::new(db_pool.clone()));

        let password_hasher = Arc::new(PasswordHasher::new(&config.auth));
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));

        let verifier = CredentialVerifier::new(Arc::clone(&user_repo), Arc::clone(&password_hasher));
        let session_store = Arc::new(SessionStore::new(
            Arc::clone(&session_repo),
            config.session.clone(),
        ));
        let session_manager = Arc::new(SessionManager::new(
            verifier.clone(),
            Arc::clone(&session_store),
            Arc::clone(&user_repo),
        ));

        let policy = Arc::new(PolicyEngine::new(
            Arc::clone(&user_repo),
            Arc::clone(&onboarding_repo),
            Arc::clone(&subscription_repo),
            config.onboarding.clone(),
        ));

        let token_encoder = Arc::new(TokenEncoder::new(&config.auth));
        let token_decoder = Arc::new(TokenDecoder::new(&config.auth));
        let token_service = Arc::new(TokenService::new(
            token_encoder,
            token_decoder,
            Arc::clone(&user_repo),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            user_repo,
            verifier,
            session_store,
            session_manager,
            policy,
            token_service,
            password_hasher,
            password_validator,
        }
    }
}
