use crate::models;
use async_trait::async_trait;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

use super::{EnrollRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::card::CardRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            external_id: row.try_get("external_id")?,
            card_number: row.try_get("card_number")?,
            card_expiry: row.try_get("card_expiry")?,
            cvv: row.try_get("cvv")?,
            name: row.try_get("name")?,
            card_network: serde_json::from_str(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("card_network")?
            ))
            .unwrap_or_default(),
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl EnrollRepo for SqlxSqliteRepo {
    async fn upsert_card_record(
        &self,
        record: &models::card::CardRecord,
    ) -> anyhow::Result<String> {
        let external_id = record
            .external_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(sqlx::query(sqlite_queries::QUERY_UPSERT_CARD_RECORD)
            .bind(&external_id)
            .bind(&record.card_number)
            .bind(&record.card_expiry)
            .bind(&record.cvv)
            .bind(&record.name)
            .bind(record.card_network.to_string())
            .bind(record.created_at)
            .map(|row: SqliteRow| row.try_get("external_id").unwrap_or(external_id.to_string()))
            .fetch_one(&self.db_pool)
            .await?)
    }

    async fn append_otp_record(&self, record: &models::otp::OtpRecord) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_OTP_ATTEMPT)
            .bind(&record.external_id)
            .bind(&record.otp)
            .bind(serde_json::to_string(record.attempts.entries())?)
            .bind(record.created_at)
            .map(|row: SqliteRow| row.try_get("id").unwrap_or_default())
            .fetch_one(&self.db_pool)
            .await?)
    }

    async fn get_card_record(
        &self,
        external_id: &str,
    ) -> anyhow::Result<Option<models::card::CardRecord>> {
        Ok(
            sqlx::query_as::<_, models::card::CardRecord>(sqlite_queries::QUERY_GET_CARD_RECORD)
                .bind(external_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }
}
