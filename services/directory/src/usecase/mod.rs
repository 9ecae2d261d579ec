pub mod member;
pub mod otp;
pub mod profile;

/// Bounded retries for lost `lock_version` races before giving up.
pub(crate) const CAS_ATTEMPTS: usize = 3;
