use chrono::{DateTime, Utc};
use rand::RngExt;

use yearbook_domain::identifier::Identifier;
use yearbook_domain::throttle::{OtpPolicy, ThrottleDecision};

use crate::domain::repository::{Mailer, MemberRepository, OtpHasher};
use crate::domain::types::PendingOtp;
use crate::error::DirectoryError;
use crate::usecase::CAS_ATTEMPTS;

const OTP_EMAIL_SUBJECT: &str = "Your profile update passcode";

/// Uniformly random 6-digit decimal passcode (100000-999999 inclusive).
fn generate_passcode() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000u32..=999_999).to_string()
}

fn passcode_email_body(name: &str, code: &str, ttl_minutes: i64) -> String {
    format!(
        "<p>Hi {name},</p>\
         <p>Your one-time passcode is <b>{code}</b>. \
         It expires in {ttl_minutes} minutes and works exactly once.</p>\
         <p>If you did not request a profile update, ignore this email.</p>"
    )
}

pub struct RequestOtpInput {
    pub identifier: Identifier,
    pub now: DateTime<Utc>,
}

pub struct RequestOtpUseCase<R, H, M>
where
    R: MemberRepository,
    H: OtpHasher,
    M: Mailer,
{
    pub repo: R,
    pub hasher: H,
    pub mailer: M,
    pub policy: OtpPolicy,
}

impl<R, H, M> RequestOtpUseCase<R, H, M>
where
    R: MemberRepository,
    H: OtpHasher,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestOtpInput) -> Result<(), DirectoryError> {
        for _ in 0..CAS_ATTEMPTS {
            // 1. Load by unique key → 404 if unknown
            let mut record = self
                .repo
                .find_by_identifier(&input.identifier)
                .await?
                .ok_or(DirectoryError::MemberNotFound)?;

            // 2. Gate on the rolling window (resets it when lapsed) → 429 when spent
            match record.throttle.check_and_reset(input.now, &self.policy) {
                ThrottleDecision::Denied { retry_after_secs } => {
                    return Err(DirectoryError::RateLimitExceeded { retry_after_secs });
                }
                ThrottleDecision::Permitted => {}
            }

            // 3. Generate + hash; only the digest is ever stored
            let code = generate_passcode();
            let digest = self.hasher.hash(&code)?;
            record.pending_otp = Some(PendingOtp {
                hash: digest,
                expires_at: input.now + self.policy.ttl,
            });
            record.throttle.record_issue();

            // 4. Conditional write; a lost race re-runs the whole sequence
            if !self.repo.save_otp_state(&record).await? {
                tracing::warn!(member = %record.id, "lost passcode issuance race, retrying");
                continue;
            }

            // 5. Deliver. The passcode is already durable: a failed send surfaces
            //    DeliveryFailure and leaves the stored state for a later retry.
            let body =
                passcode_email_body(&record.name, &code, self.policy.ttl.num_minutes().max(1));
            return self.mailer.send(&record.email, OTP_EMAIL_SUBJECT, &body).await;
        }
        Err(DirectoryError::Internal(anyhow::anyhow!(
            "exhausted retries on passcode issuance"
        )))
    }
}
