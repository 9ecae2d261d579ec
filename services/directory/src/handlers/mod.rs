pub mod member;
pub mod otp;

use yearbook_domain::identifier::Identifier;

use crate::error::DirectoryError;

/// Parse the `{identifier}` path segment into a typed lookup key.
pub(crate) fn parse_identifier(raw: &str) -> Result<Identifier, DirectoryError> {
    Identifier::classify(raw)
        .ok_or_else(|| DirectoryError::Validation("identifier must not be empty".to_owned()))
}
