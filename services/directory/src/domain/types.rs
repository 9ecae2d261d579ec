use chrono::{DateTime, Utc};
use uuid::Uuid;

use yearbook_domain::throttle::ThrottleState;

pub const ABOUT_MAX_CHARS: usize = 500;
pub const NAME_MAX_CHARS: usize = 100;
pub const ROLL_MAX_CHARS: usize = 32;

/// Hashed passcode awaiting verification. The digest and its expiry travel
/// together; a record holds both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOtp {
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Directory member record.
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll: String,
    pub skills: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    pub pending_otp: Option<PendingOtp>,
    pub throttle: ThrottleState,
    /// Bumped by every conditional write; see `MemberRepository`.
    pub lock_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update submitted alongside a passcode. Absent fields are
/// left unchanged. Uniqueness-bearing identity fields may arrive here from
/// clients but are always rejected by the mutator.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roll: Option<String>,
    pub skills: Option<Vec<String>>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
}

/// Proof of a successful passcode verification, good for exactly one profile
/// update on the member it names. Consumed by value — a second use is
/// unrepresentable.
#[derive(Debug)]
pub struct UpdateAuthorization {
    member_id: Uuid,
}

impl UpdateAuthorization {
    pub(crate) fn new(member_id: Uuid) -> Self {
        Self { member_id }
    }

    pub fn member_id(&self) -> Uuid {
        self.member_id
    }
}

/// Normalize and validate an email address: trimmed, lowercased, with a
/// non-empty local part and a dotted domain.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_ascii_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return None;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return None;
    }
    Some(email)
}

/// Validate a phone number: exactly 10 ASCII digits.
pub fn validate_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a roll number: alphanumeric + hyphen + underscore, 1-32 chars.
pub fn validate_roll(roll: &str) -> bool {
    if roll.is_empty() || roll.len() > ROLL_MAX_CHARS {
        return false;
    }
    roll.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= NAME_MAX_CHARS
}

/// Validate a profile link: a well-formed absolute http(s) URL.
pub fn validate_profile_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

pub fn validate_about(about: &str) -> bool {
    about.chars().count() <= ABOUT_MAX_CHARS
}

/// Validate a skills list: every entry non-empty after trimming.
pub fn validate_skills(skills: &[String]) -> bool {
    skills.iter().all(|s| !s.trim().is_empty())
}
