use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use crate::domain::types::ProfileChanges;
use crate::error::DirectoryError;
use crate::handlers::member::ProfileResponse;
use crate::handlers::parse_identifier;
use crate::state::AppState;
use crate::usecase::otp::{RequestOtpInput, RequestOtpUseCase};
use crate::usecase::profile::{
    ApplyProfileInput, ApplyProfileUseCase, VerifyOtpInput, VerifyOtpUseCase,
};

// ── POST /members/{identifier}/otp ───────────────────────────────────────────

pub async fn request_otp(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<StatusCode, DirectoryError> {
    let identifier = parse_identifier(&identifier)?;
    let usecase = RequestOtpUseCase {
        repo: state.member_repo(),
        hasher: state.hasher.clone(),
        mailer: state.mailer.clone(),
        policy: state.policy,
    };
    usecase
        .execute(RequestOtpInput {
            identifier,
            now: Utc::now(),
        })
        .await?;
    // The passcode travels by email only; the response carries nothing.
    Ok(StatusCode::ACCEPTED)
}

// ── PATCH /members/{identifier}/profile ──────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ChangesRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roll: Option<String>,
    pub skills: Option<Vec<String>>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub otp: String,
    #[serde(default)]
    pub changes: ChangesRequest,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, DirectoryError> {
    let identifier = parse_identifier(&identifier)?;
    let now = Utc::now();

    let verify = VerifyOtpUseCase {
        repo: state.member_repo(),
        hasher: state.hasher.clone(),
    };
    let authorization = verify
        .execute(VerifyOtpInput {
            identifier: identifier.clone(),
            code: body.otp,
            now,
        })
        .await?;

    let apply = ApplyProfileUseCase {
        repo: state.member_repo(),
    };
    let record = apply
        .execute(ApplyProfileInput {
            identifier,
            authorization,
            changes: ProfileChanges {
                name: body.changes.name,
                email: body.changes.email,
                phone: body.changes.phone,
                roll: body.changes.roll,
                skills: body.changes.skills,
                linkedin: body.changes.linkedin,
                github: body.changes.github,
                about: body.changes.about,
            },
            now,
        })
        .await?;

    Ok(Json(record.into()))
}
