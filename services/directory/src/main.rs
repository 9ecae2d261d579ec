use sea_orm::Database;
use tracing::info;

use yearbook_directory::config::DirectoryConfig;
use yearbook_directory::infra::hash::Argon2OtpHasher;
use yearbook_directory::infra::mail::HttpMailer;
use yearbook_directory::router::build_router;
use yearbook_directory::state::AppState;

#[tokio::main]
async fn main() {
    yearbook_core::tracing::init_tracing();

    let config = DirectoryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let hasher = Argon2OtpHasher::new(config.argon2_memory_kib, config.argon2_iterations)
        .expect("invalid Argon2 configuration");

    let mailer = HttpMailer::new(
        config.mail_api_url.clone(),
        config.mail_api_token.clone(),
        config.mail_from.clone(),
    );

    let state = AppState {
        db,
        policy: config.otp_policy(),
        hasher,
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.directory_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("directory service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
