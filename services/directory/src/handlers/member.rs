use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::types::MemberRecord;
use crate::error::DirectoryError;
use crate::handlers::parse_identifier;
use crate::state::AppState;
use crate::usecase::member::{GetProfileUseCase, RegisterMemberInput, RegisterMemberUseCase};

// ── Response types ───────────────────────────────────────────────────────────

/// Public view of a member: identity + profile fields. Passcode state never
/// leaves the service.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll: String,
    pub skills: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    #[serde(serialize_with = "yearbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "yearbook_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<MemberRecord> for ProfileResponse {
    fn from(record: MemberRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            email: record.email,
            phone: record.phone,
            roll: record.roll,
            skills: record.skills,
            linkedin: record.linkedin,
            github: record.github,
            about: record.about,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// ── POST /members ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterMemberRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
}

pub async fn register_member(
    State(state): State<AppState>,
    Json(body): Json<RegisterMemberRequest>,
) -> Result<StatusCode, DirectoryError> {
    let usecase = RegisterMemberUseCase {
        repo: state.member_repo(),
    };
    usecase
        .execute(RegisterMemberInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            roll: body.roll,
            skills: body.skills,
            linkedin: body.linkedin,
            github: body.github,
            about: body.about,
            now: Utc::now(),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── GET /members/{identifier} ────────────────────────────────────────────────

pub async fn get_profile(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<ProfileResponse>, DirectoryError> {
    let identifier = parse_identifier(&identifier)?;
    let usecase = GetProfileUseCase {
        repo: state.member_repo(),
    };
    let record = usecase.execute(&identifier).await?;
    Ok(Json(record.into()))
}
