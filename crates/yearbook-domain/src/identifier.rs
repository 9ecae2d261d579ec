//! Member lookup identifiers.

/// How a directory record may be addressed: any of its three unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
    Roll(String),
}

impl Identifier {
    /// Classify a raw lookup string by shape.
    ///
    /// Contains `@` → email (lowercased). Exactly 10 ASCII digits → phone.
    /// Anything else non-empty → roll number. Whitespace is trimmed first.
    pub fn classify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.contains('@') {
            return Some(Self::Email(raw.to_ascii_lowercase()));
        }
        if raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Self::Phone(raw.to_owned()));
        }
        Some(Self::Roll(raw.to_owned()))
    }

    /// The underlying lookup value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(v) | Self::Phone(v) | Self::Roll(v) => v,
        }
    }
}
