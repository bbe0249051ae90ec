// Cross-account lookup: resolves a freelancer-supplied name/token pair
// to the owning admin account, yielding a read-scoped session. This is
// a convenience path, not authentication; the session never authorizes
// writes.

use tracing::info;

use crate::core::AppError;
use crate::modules::freelancers::repositories::FreelancerRepository;

/// The two ways a lookup can miss. Both read as "not found" to the
/// user but are distinct checks: an unknown token never reaches the
/// name comparison.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("Freelancer not found: no record matches that ID")]
    IdNotFound,

    #[error("Freelancer not found: the name does not match that ID")]
    NameMismatch,

    #[error("Lookup failed: {0}")]
    Store(String),
}

impl From<LookupFailure> for AppError {
    fn from(failure: LookupFailure) -> Self {
        match failure {
            LookupFailure::Store(msg) => AppError::Store(msg),
            other => AppError::NotFound(other.to_string()),
        }
    }
}

/// Read-scoped session for a freelancer viewing their own report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSession {
    pub admin_id: String,
    pub freelancer_name: String,
}

pub struct LookupService {
    freelancers: FreelancerRepository,
}

impl LookupService {
    pub fn new(freelancers: FreelancerRepository) -> Self {
        Self { freelancers }
    }

    /// Resolve `(full_name, token)` to the owning admin. The token is
    /// matched exactly after trimming; the name comparison is trimmed
    /// and case-insensitive, first match wins.
    pub async fn resolve(
        &self,
        full_name: &str,
        token: &str,
    ) -> std::result::Result<ReadSession, LookupFailure> {
        let candidates = self
            .freelancers
            .find_by_token(token.trim())
            .await
            .map_err(|e| LookupFailure::Store(e.to_string()))?;

        if candidates.is_empty() {
            return Err(LookupFailure::IdNotFound);
        }

        let wanted = full_name.trim().to_lowercase();
        for candidate in candidates {
            if candidate.full_name().to_lowercase() == wanted {
                info!(
                    admin_id = %candidate.admin_id,
                    freelancer = %candidate.full_name(),
                    "freelancer lookup resolved"
                );
                let freelancer_name = candidate.full_name();
                return Ok(ReadSession {
                    admin_id: candidate.admin_id,
                    freelancer_name,
                });
            }
        }

        Err(LookupFailure::NameMismatch)
    }
}
