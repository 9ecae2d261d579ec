use sea_orm::entity::prelude::*;

/// Directory member record: identity fields, public profile fields, and the
/// transient passcode state driving the self-service update flow.
/// `lock_version` backs the conditional updates that serialize writers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[sea_orm(unique)]
    pub roll: String,
    pub skills: Json,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    pub otp_hash: Option<String>,
    pub otp_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub otp_request_count: i32,
    pub otp_window_started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub lock_version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
