use sea_orm::DatabaseConnection;

use yearbook_domain::throttle::OtpPolicy;

use crate::infra::db::DbMemberRepository;
use crate::infra::hash::Argon2OtpHasher;
use crate::infra::mail::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub policy: OtpPolicy,
    pub hasher: Argon2OtpHasher,
    pub mailer: HttpMailer,
}

impl AppState {
    pub fn member_repo(&self) -> DbMemberRepository {
        DbMemberRepository {
            db: self.db.clone(),
        }
    }
}
