use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::repository::OtpHasher;
use crate::error::DirectoryError;

/// Argon2id passcode hasher with per-digest random salts.
///
/// The work factor comes from service config so it can be raised (or the
/// algorithm swapped behind the `OtpHasher` trait) without touching the
/// issuance/verification flow.
#[derive(Clone)]
pub struct Argon2OtpHasher {
    params: Params,
}

impl Argon2OtpHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, DirectoryError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|_| anyhow::anyhow!("invalid Argon2 parameters"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl OtpHasher for Argon2OtpHasher {
    fn hash(&self, plain: &str) -> Result<String, DirectoryError> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        let digest = self
            .argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|_| anyhow::anyhow!("failed to hash passcode"))?
            .to_string();
        Ok(digest)
    }

    fn compare(&self, plain: &str, digest: &str) -> Result<bool, DirectoryError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|_| anyhow::anyhow!("stored passcode digest is malformed"))?;
        Ok(self
            .argon2()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}
