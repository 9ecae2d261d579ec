use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Directory service error variants.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("member not found")]
    MemberNotFound,
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: i64 },
    #[error("no passcode pending, request one first")]
    NoPendingOtp,
    #[error("passcode expired, request a new one")]
    OtpExpired,
    #[error("passcode mismatch")]
    OtpMismatch,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("member already registered")]
    AlreadyRegistered,
    #[error("passcode email delivery failed, the stored passcode is still valid")]
    DeliveryFailure,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MemberNotFound => "NOT_FOUND",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::NoPendingOtp => "NO_PENDING_OTP",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::DeliveryFailure => "DELIVERY_FAILURE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MemberNotFound => StatusCode::NOT_FOUND,
            Self::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NoPendingOtp | Self::OtpExpired | Self::OtpMismatch | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyRegistered => StatusCode::CONFLICT,
            Self::DeliveryFailure => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let retry_after = match &self {
            Self::RateLimitExceeded { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
