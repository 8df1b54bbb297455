pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

/// Document store the enrollment flow writes to. Exactly one write happens
/// per accepted card submit and per OTP submit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollRepo {
    /// Adds or updates the card document. When the record carries no
    /// external id a fresh one is minted; the effective id is returned so
    /// the session can correlate later writes.
    async fn upsert_card_record(
        &self,
        record: &models::card::CardRecord,
    ) -> anyhow::Result<String>;

    async fn append_otp_record(&self, record: &models::otp::OtpRecord) -> anyhow::Result<i64>;

    async fn get_card_record(
        &self,
        external_id: &str,
    ) -> anyhow::Result<Option<models::card::CardRecord>>;
}

pub type ImplEnrollRepo = Box<dyn EnrollRepo>;
