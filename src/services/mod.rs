pub mod verification;

use crate::models;
use async_trait::async_trait;

/// Collaborator that resolves OTP submissions. The enrollment controller
/// treats the outcome as an input; it never decides it locally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpVerifier {
    async fn verify(&self, code: &str) -> anyhow::Result<models::otp::OtpOutcome>;
}

pub type ImplOtpVerifier = Box<dyn OtpVerifier>;
