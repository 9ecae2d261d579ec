use yearbook_domain::throttle::OtpPolicy;

/// Directory service configuration loaded from environment variables.
#[derive(Debug)]
pub struct DirectoryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3114). Env var: `DIRECTORY_PORT`.
    pub directory_port: u16,
    /// Mail API endpoint for passcode delivery. Env var: `MAIL_API_URL`.
    pub mail_api_url: String,
    /// Bearer token for the mail API. Env var: `MAIL_API_TOKEN`.
    pub mail_api_token: String,
    /// From-address on outgoing passcode emails. Env var: `MAIL_FROM`.
    pub mail_from: String,
    /// Passcode time-to-live in seconds (default 600). Env var: `OTP_TTL_SECS`.
    pub otp_ttl_secs: i64,
    /// Max issuances per rolling window (default 5). Env var: `OTP_MAX_REQUESTS`.
    pub otp_max_requests: u32,
    /// Rolling window length in seconds (default 3600). Env var: `OTP_WINDOW_SECS`.
    pub otp_window_secs: i64,
    /// Argon2 memory cost in KiB (default 19456). Env var: `ARGON2_MEMORY_KIB`.
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count (default 2). Env var: `ARGON2_ITERATIONS`.
    pub argon2_iterations: u32,
}

impl DirectoryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            directory_port: std::env::var("DIRECTORY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_token: std::env::var("MAIL_API_TOKEN").expect("MAIL_API_TOKEN"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            otp_ttl_secs: std::env::var("OTP_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            otp_max_requests: std::env::var("OTP_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            otp_window_secs: std::env::var("OTP_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            argon2_memory_kib: std::env::var("ARGON2_MEMORY_KIB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(19456),
            argon2_iterations: std::env::var("ARGON2_ITERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }

    pub fn otp_policy(&self) -> OtpPolicy {
        OtpPolicy {
            ttl: chrono::Duration::seconds(self.otp_ttl_secs),
            max_requests: self.otp_max_requests,
            window: chrono::Duration::seconds(self.otp_window_secs),
        }
    }
}
