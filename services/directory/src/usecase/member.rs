use chrono::{DateTime, Utc};
use uuid::Uuid;

use yearbook_domain::identifier::Identifier;
use yearbook_domain::throttle::ThrottleState;

use crate::domain::repository::MemberRepository;
use crate::domain::types::{
    MemberRecord, normalize_email, validate_about, validate_name, validate_phone,
    validate_profile_url, validate_roll, validate_skills,
};
use crate::error::DirectoryError;

// ── RegisterMember ───────────────────────────────────────────────────────────

pub struct RegisterMemberInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll: String,
    pub skills: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    pub now: DateTime<Utc>,
}

pub struct RegisterMemberUseCase<R: MemberRepository> {
    pub repo: R,
}

impl<R: MemberRepository> RegisterMemberUseCase<R> {
    pub async fn execute(&self, input: RegisterMemberInput) -> Result<(), DirectoryError> {
        if !validate_name(&input.name) {
            return Err(DirectoryError::Validation(
                "name must be 1-100 characters".to_owned(),
            ));
        }
        let email = normalize_email(&input.email).ok_or_else(|| {
            DirectoryError::Validation("email address is malformed".to_owned())
        })?;
        if !validate_phone(&input.phone) {
            return Err(DirectoryError::Validation(
                "phone must be exactly 10 digits".to_owned(),
            ));
        }
        if !validate_roll(&input.roll) {
            return Err(DirectoryError::Validation(
                "roll number must be 1-32 alphanumeric characters".to_owned(),
            ));
        }
        if !validate_skills(&input.skills) {
            return Err(DirectoryError::Validation(
                "skills entries must be non-empty".to_owned(),
            ));
        }
        for link in [input.linkedin.as_deref(), input.github.as_deref()]
            .into_iter()
            .flatten()
        {
            if !validate_profile_url(link) {
                return Err(DirectoryError::Validation(
                    "profile links must be well-formed http(s) URLs".to_owned(),
                ));
            }
        }
        if let Some(ref about) = input.about {
            if !validate_about(about) {
                return Err(DirectoryError::Validation(
                    "about must be at most 500 characters".to_owned(),
                ));
            }
        }

        let record = MemberRecord {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            email,
            phone: input.phone,
            roll: input.roll,
            skills: input.skills.iter().map(|s| s.trim().to_owned()).collect(),
            linkedin: input.linkedin,
            github: input.github,
            about: input.about,
            pending_otp: None,
            throttle: ThrottleState::default(),
            lock_version: 0,
            created_at: input.now,
            updated_at: input.now,
        };
        self.repo.create(&record).await
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: MemberRepository> {
    pub repo: R,
}

impl<R: MemberRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, identifier: &Identifier) -> Result<MemberRecord, DirectoryError> {
        self.repo
            .find_by_identifier(identifier)
            .await?
            .ok_or(DirectoryError::MemberNotFound)
    }
}
