//! Helper functions could be used in api/, front/, ...

use crate::{config, consts};
use anyhow::anyhow;
use argon2::Argon2;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::{str::FromStr, sync::LazyLock};
use totp_rs::{Algorithm, Secret, TOTP};
use uuid::Uuid;

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    let options = if encrypted {
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
            .pragma("key", &config::APP_CONFIG.db_pass_encrypt)
            .pragma("cipher_page_size", "1024")
            .pragma("kdf_iter", "64000")
            .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
            .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
            .pragma("foreign_keys", "ON")
            .journal_mode(SqliteJournalMode::Delete)
    } else {
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?.pragma("foreign_keys", "ON")
    };

    let pool = SqlitePool::connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub fn build_csrf_key(pwd: &str, salt: &str) -> anyhow::Result<[u8; 32]> {
    let mut csrf_key = [0u8; 32];
    Argon2::default()
        .hash_password_into(
            Uuid::from_str(pwd)?.as_bytes(),
            Uuid::from_str(salt)?.as_bytes(),
            &mut csrf_key,
        )
        .map_err(|err| anyhow!("csrf_key couldn't be created: {}", err))?;

    Ok(csrf_key)
}

pub fn build_random_csrf_key() -> anyhow::Result<[u8; 32]> {
    build_csrf_key(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string())
}

/// Time-based one time password client
pub static TOTP_CLIENT: LazyLock<TOTP> = LazyLock::new(|| {
    TOTP::new(
        Algorithm::SHA512,
        consts::OTP_DIGITS,
        1,
        60,
        Secret::Raw(config::OTP_SECRET.as_bytes().to_vec())
            .to_bytes()
            .unwrap(),
    )
    .unwrap()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[ntex::test]
    async fn test_migrations_apply_on_a_fresh_database() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();

        sqlx::query("SELECT external_id FROM card_record")
            .fetch_all(&pool)
            .await
            .unwrap();
        sqlx::query("SELECT id FROM otp_attempt")
            .fetch_all(&pool)
            .await
            .unwrap();
    }
}
