use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::accounts::models::AdminAccount;
use crate::modules::accounts::repositories::AccountRepository;
use crate::modules::accounts::services::mailer::Mailer;
use crate::modules::accounts::services::session::{Identity, SessionRegistry};

const MIN_PASSWORD_LEN: usize = 8;

/// Admin identity: one-time sign-up, sign-in/out, password reset.
pub struct AuthService {
    accounts: AccountRepository,
    sessions: SessionRegistry,
    mailer: Arc<dyn Mailer>,
}

impl AuthService {
    pub fn new(
        accounts: AccountRepository,
        sessions: SessionRegistry,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            mailer,
        }
    }

    /// Whether the one-time sign-up path is still open.
    pub async fn sign_up_allowed(&self) -> Result<bool> {
        Ok(!self.accounts.any_exists().await?)
    }

    /// Create the first admin account. Rejected once any account exists.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<String> {
        if self.accounts.any_exists().await? {
            return Err(AppError::validation(
                "An admin account already exists. Sign-up is disabled.",
            ));
        }

        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let account = AdminAccount::new(email.to_string(), hash_password(password)?)?;
        let id = self.accounts.create(&account).await?;
        info!(account_id = %id, "admin account created");
        Ok(id)
    }

    /// Verify credentials and issue a session token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(String, String)> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let account_id = account
            .id
            .ok_or_else(|| AppError::internal("Stored account has no id"))?;
        let token = self.sessions.issue(Identity::Admin {
            account_id: account_id.clone(),
        });

        info!(account_id = %account_id, "admin signed in");
        Ok((token, account_id))
    }

    /// Revoke a session. Unknown tokens are ignored.
    pub fn sign_out(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Issue a read-scoped session for a resolved freelancer lookup.
    pub fn open_freelancer_session(&self, admin_id: String, freelancer_name: String) -> String {
        self.sessions.issue(Identity::Freelancer {
            admin_id,
            freelancer_name,
        })
    }

    /// Dispatch a password-reset email through the mail boundary.
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        if self.accounts.find_by_email(email).await?.is_none() {
            return Err(AppError::not_found(format!(
                "No account for '{}'",
                email
            )));
        }
        self.mailer.send_password_reset(email).await
    }
}

/// Hash a password with Argon2 and a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC-format hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
