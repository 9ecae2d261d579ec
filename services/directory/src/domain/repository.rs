#![allow(async_fn_in_trait)]

use yearbook_domain::identifier::Identifier;

use crate::domain::types::MemberRecord;
use crate::error::DirectoryError;

/// Repository for member records.
///
/// The two `save_*` methods are conditional writes: they persist only when
/// the stored `lock_version` still equals `record.lock_version`, bumping it
/// by one on success. `false` means a concurrent writer won and the caller
/// must re-read and retry its whole read-check-modify-write sequence.
pub trait MemberRepository: Send + Sync {
    /// Look a record up by any of its unique keys.
    async fn find_by_identifier(
        &self,
        ident: &Identifier,
    ) -> Result<Option<MemberRecord>, DirectoryError>;

    /// Insert a new record. Unique-key collisions map to `AlreadyRegistered`.
    async fn create(&self, record: &MemberRecord) -> Result<(), DirectoryError>;

    /// Persist the passcode fields (hash, expiry, throttle counters).
    async fn save_otp_state(&self, record: &MemberRecord) -> Result<bool, DirectoryError>;

    /// Persist the mutable profile fields (name, skills, links, about).
    async fn save_profile(&self, record: &MemberRecord) -> Result<bool, DirectoryError>;
}

/// One-way passcode hashing. Implementations carry their own work factor so
/// algorithm upgrades never touch the issuance/verification flow.
pub trait OtpHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, DirectoryError>;
    fn compare(&self, plain: &str, digest: &str) -> Result<bool, DirectoryError>;
}

/// Outbound email delivery. Send failures surface as `DeliveryFailure`; the
/// caller decides whether any already-persisted state survives (it does, for
/// passcodes).
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), DirectoryError>;
}
