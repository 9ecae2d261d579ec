use chrono::{DateTime, Utc};

use yearbook_domain::identifier::Identifier;

use crate::domain::repository::{MemberRepository, OtpHasher};
use crate::domain::types::{
    MemberRecord, ProfileChanges, UpdateAuthorization, validate_about, validate_name,
    validate_profile_url, validate_skills,
};
use crate::error::DirectoryError;
use crate::usecase::CAS_ATTEMPTS;

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub identifier: Identifier,
    pub code: String,
    pub now: DateTime<Utc>,
}

pub struct VerifyOtpUseCase<R, H>
where
    R: MemberRepository,
    H: OtpHasher,
{
    pub repo: R,
    pub hasher: H,
}

impl<R, H> VerifyOtpUseCase<R, H>
where
    R: MemberRepository,
    H: OtpHasher,
{
    /// Check a submitted passcode against the pending digest.
    ///
    /// Success clears the pending passcode (single use) and yields an
    /// authorization for exactly one profile update. Expiry also clears it,
    /// so a stale code can never be replayed. A mismatch writes nothing —
    /// the real passcode stays pending.
    pub async fn execute(
        &self,
        input: VerifyOtpInput,
    ) -> Result<UpdateAuthorization, DirectoryError> {
        for _ in 0..CAS_ATTEMPTS {
            let mut record = self
                .repo
                .find_by_identifier(&input.identifier)
                .await?
                .ok_or(DirectoryError::MemberNotFound)?;

            let pending = record
                .pending_otp
                .clone()
                .ok_or(DirectoryError::NoPendingOtp)?;

            if input.now >= pending.expires_at {
                record.pending_otp = None;
                if self.repo.save_otp_state(&record).await? {
                    return Err(DirectoryError::OtpExpired);
                }
                // lost the clear race; re-read and re-evaluate
                continue;
            }

            if !self.hasher.compare(&input.code, &pending.hash)? {
                return Err(DirectoryError::OtpMismatch);
            }

            record.pending_otp = None;
            if self.repo.save_otp_state(&record).await? {
                return Ok(UpdateAuthorization::new(record.id));
            }
            tracing::warn!(member = %record.id, "lost passcode consume race, retrying");
        }
        Err(DirectoryError::Internal(anyhow::anyhow!(
            "exhausted retries on passcode verification"
        )))
    }
}

// ── ApplyProfile ─────────────────────────────────────────────────────────────

pub struct ApplyProfileInput {
    pub identifier: Identifier,
    /// Consumed with the input; a second apply needs a fresh verification.
    pub authorization: UpdateAuthorization,
    pub changes: ProfileChanges,
    pub now: DateTime<Utc>,
}

pub struct ApplyProfileUseCase<R: MemberRepository> {
    pub repo: R,
}

impl<R: MemberRepository> ApplyProfileUseCase<R> {
    pub async fn execute(&self, input: ApplyProfileInput) -> Result<MemberRecord, DirectoryError> {
        validate_changes(&input.changes)?;

        for _ in 0..CAS_ATTEMPTS {
            let mut record = self
                .repo
                .find_by_identifier(&input.identifier)
                .await?
                .ok_or(DirectoryError::MemberNotFound)?;

            if record.id != input.authorization.member_id() {
                return Err(DirectoryError::Unauthorized);
            }

            apply_changes(&mut record, &input.changes);
            record.updated_at = input.now;

            if self.repo.save_profile(&record).await? {
                record.lock_version += 1;
                return Ok(record);
            }
            tracing::warn!(member = %record.id, "lost profile update race, retrying");
        }
        Err(DirectoryError::Internal(anyhow::anyhow!(
            "exhausted retries on profile update"
        )))
    }
}

/// Field-level constraints for a partial update. Uniqueness-bearing identity
/// fields are rejected outright — changing them would bypass the registration
/// uniqueness checks.
fn validate_changes(changes: &ProfileChanges) -> Result<(), DirectoryError> {
    if changes.email.is_some() || changes.phone.is_some() || changes.roll.is_some() {
        return Err(DirectoryError::Validation(
            "email, phone and roll number cannot be changed through this flow".to_owned(),
        ));
    }
    if let Some(ref name) = changes.name {
        if !validate_name(name) {
            return Err(DirectoryError::Validation(
                "name must be 1-100 characters".to_owned(),
            ));
        }
    }
    if let Some(ref skills) = changes.skills {
        if !validate_skills(skills) {
            return Err(DirectoryError::Validation(
                "skills entries must be non-empty".to_owned(),
            ));
        }
    }
    if let Some(ref linkedin) = changes.linkedin {
        if !validate_profile_url(linkedin) {
            return Err(DirectoryError::Validation(
                "linkedin must be a well-formed http(s) URL".to_owned(),
            ));
        }
    }
    if let Some(ref github) = changes.github {
        if !validate_profile_url(github) {
            return Err(DirectoryError::Validation(
                "github must be a well-formed http(s) URL".to_owned(),
            ));
        }
    }
    if let Some(ref about) = changes.about {
        if !validate_about(about) {
            return Err(DirectoryError::Validation(
                "about must be at most 500 characters".to_owned(),
            ));
        }
    }
    Ok(())
}

fn apply_changes(record: &mut MemberRecord, changes: &ProfileChanges) {
    if let Some(ref name) = changes.name {
        record.name = name.trim().to_owned();
    }
    if let Some(ref skills) = changes.skills {
        record.skills = skills.iter().map(|s| s.trim().to_owned()).collect();
    }
    if let Some(ref linkedin) = changes.linkedin {
        record.linkedin = Some(linkedin.clone());
    }
    if let Some(ref github) = changes.github {
        record.github = Some(github.clone());
    }
    if let Some(ref about) = changes.about {
        record.about = Some(about.clone());
    }
}
