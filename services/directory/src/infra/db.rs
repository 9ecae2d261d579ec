use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr, sea_query::Expr,
};

use yearbook_directory_schema::members;
use yearbook_domain::identifier::Identifier;
use yearbook_domain::throttle::ThrottleState;

use crate::domain::repository::MemberRepository;
use crate::domain::types::{MemberRecord, PendingOtp};
use crate::error::DirectoryError;

#[derive(Clone)]
pub struct DbMemberRepository {
    pub db: DatabaseConnection,
}

impl MemberRepository for DbMemberRepository {
    async fn find_by_identifier(
        &self,
        ident: &Identifier,
    ) -> Result<Option<MemberRecord>, DirectoryError> {
        let query = members::Entity::find();
        let query = match ident {
            Identifier::Email(email) => query.filter(members::Column::Email.eq(email)),
            Identifier::Phone(phone) => query.filter(members::Column::Phone.eq(phone)),
            Identifier::Roll(roll) => query.filter(members::Column::Roll.eq(roll)),
        };
        let model = query
            .one(&self.db)
            .await
            .context("find member by identifier")?;
        Ok(model.map(member_from_model))
    }

    async fn create(&self, record: &MemberRecord) -> Result<(), DirectoryError> {
        let skills = serde_json::to_value(&record.skills).context("serialize skills")?;
        let result = members::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            email: Set(record.email.clone()),
            phone: Set(record.phone.clone()),
            roll: Set(record.roll.clone()),
            skills: Set(skills),
            linkedin: Set(record.linkedin.clone()),
            github: Set(record.github.clone()),
            about: Set(record.about.clone()),
            otp_hash: Set(None),
            otp_expires_at: Set(None),
            otp_request_count: Set(0),
            otp_window_started_at: Set(None),
            lock_version: Set(0),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(DirectoryError::AlreadyRegistered)
            }
            Err(e) => Err(anyhow::Error::from(e).context("create member").into()),
        }
    }

    async fn save_otp_state(&self, record: &MemberRecord) -> Result<bool, DirectoryError> {
        let (hash, expires_at) = match record.pending_otp {
            Some(ref otp) => (Some(otp.hash.clone()), Some(otp.expires_at)),
            None => (None, None),
        };
        let result = members::Entity::update_many()
            .filter(members::Column::Id.eq(record.id))
            .filter(members::Column::LockVersion.eq(record.lock_version))
            .col_expr(members::Column::OtpHash, Expr::value(hash))
            .col_expr(members::Column::OtpExpiresAt, Expr::value(expires_at))
            .col_expr(
                members::Column::OtpRequestCount,
                Expr::value(record.throttle.request_count as i32),
            )
            .col_expr(
                members::Column::OtpWindowStartedAt,
                Expr::value(record.throttle.window_started_at),
            )
            .col_expr(
                members::Column::LockVersion,
                Expr::value(record.lock_version + 1),
            )
            .exec(&self.db)
            .await
            .context("save member passcode state")?;
        Ok(result.rows_affected > 0)
    }

    async fn save_profile(&self, record: &MemberRecord) -> Result<bool, DirectoryError> {
        let skills = serde_json::to_value(&record.skills).context("serialize skills")?;
        let result = members::Entity::update_many()
            .filter(members::Column::Id.eq(record.id))
            .filter(members::Column::LockVersion.eq(record.lock_version))
            .col_expr(members::Column::Name, Expr::value(record.name.clone()))
            .col_expr(members::Column::Skills, Expr::value(skills))
            .col_expr(
                members::Column::Linkedin,
                Expr::value(record.linkedin.clone()),
            )
            .col_expr(members::Column::Github, Expr::value(record.github.clone()))
            .col_expr(members::Column::About, Expr::value(record.about.clone()))
            .col_expr(members::Column::UpdatedAt, Expr::value(record.updated_at))
            .col_expr(
                members::Column::LockVersion,
                Expr::value(record.lock_version + 1),
            )
            .exec(&self.db)
            .await
            .context("save member profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn member_from_model(model: members::Model) -> MemberRecord {
    // A hash without an expiry (or vice versa) cannot be verified; treat it
    // as no pending passcode rather than guessing.
    let pending_otp = match (model.otp_hash, model.otp_expires_at) {
        (Some(hash), Some(expires_at)) => Some(PendingOtp { hash, expires_at }),
        _ => None,
    };
    MemberRecord {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        roll: model.roll,
        skills: serde_json::from_value(model.skills).unwrap_or_default(),
        linkedin: model.linkedin,
        github: model.github,
        about: model.about,
        pending_otp,
        throttle: ThrottleState {
            request_count: model.otp_request_count.max(0) as u32,
            window_started_at: model.otp_window_started_at,
        },
        lock_version: model.lock_version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
