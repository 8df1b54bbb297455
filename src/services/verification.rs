use super::OtpVerifier;
use crate::{models::otp::OtpOutcome, utils};
use async_trait::async_trait;

/// Checks submitted codes against the process TOTP client.
#[derive(Clone, Default)]
pub struct TotpVerifier;

#[async_trait]
impl OtpVerifier for TotpVerifier {
    async fn verify(&self, code: &str) -> anyhow::Result<OtpOutcome> {
        if utils::TOTP_CLIENT.check_current(code).unwrap_or(false) {
            return Ok(OtpOutcome::Approved);
        }

        Ok(OtpOutcome::Rejected)
    }
}
