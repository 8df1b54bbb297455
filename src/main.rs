//! # Card Enrollment Web Application
//!
//! Main entry point for the card enrollment flow (card form → OTP
//! confirmation → success). Configures SSL, middleware, cryptographic
//! keys, and route handling.

#![recursion_limit = "256"]

pub mod api;
pub mod card;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;

use csrf::AesGcmCsrfProtection;
use ntex::web;
use ntex_cors::Cors;
use ntex_session::CookieSession;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    // Initialize database connection pool
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?,
    };

    // Keys are derived from configured password and salt using Argon2
    let csrf_key = utils::build_csrf_key(&config::APP_CONFIG.csrf_pass, &config::APP_CONFIG.csrf_salt)?;
    let session_key = utils::build_random_csrf_key()?;

    configure_and_run_server(csrf_key, session_key, sqlite_repo).await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    ssl_acceptor
        .set_private_key_file(&config::APP_CONFIG.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                config::APP_CONFIG.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&config::APP_CONFIG.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                config::APP_CONFIG.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the provided services
fn create_app_state(csrf_key: [u8; 32], sqlite_repo: repo::sqlite::SqlxSqliteRepo) -> front::AppState {
    front::AppState {
        csrf_protec: AesGcmCsrfProtection::from_key(csrf_key),
        repo: Box::new(sqlite_repo),
        otp_verifier: Box::new(services::verification::TotpVerifier),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    csrf_key: [u8; 32],
    session_key: [u8; 32],
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
) -> anyhow::Result<()> {
    let server_addr = ("0.0.0.0", config::APP_CONFIG.web_server_port);

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS"])
                    .allowed_origin(&config::APP_CONFIG.base_url())
                    .finish(),
            )
            .wrap(
                CookieSession::private(&session_key)
                    .secure(config::APP_CONFIG.is_prod())
                    .domain(config::APP_CONFIG.web_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .name("card-enroll-session"),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(csrf_key, sqlite_repo.clone()))
            .configure(front::routes::enroll)
            .service(front::server::index)
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = if config::APP_CONFIG.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
