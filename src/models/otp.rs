use crate::consts;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Verification result reported by the OTP collaborator. The controller
/// never decides this on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum OtpOutcome {
    // Code accepted, enrollment can complete
    #[display("approved")]
    Approved,
    // Code did not match, the user may retry
    #[display("rejected")]
    Rejected,
    // Collaborator has not resolved the attempt yet
    #[display("pending")]
    Pending,
}

/// Session-scoped log of submitted codes, capped at
/// [consts::MAX_OTP_ATTEMPTS]; the oldest entry is dropped at capacity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpAttemptLog(Vec<String>);

impl OtpAttemptLog {
    pub fn record(&mut self, code: &str) {
        if self.0.len() == consts::MAX_OTP_ATTEMPTS {
            self.0.remove(0);
        }
        self.0.push(code.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Document persisted on every OTP submit: the code plus a snapshot of the
/// session attempt log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub external_id: Option<String>,
    pub otp: String,
    pub attempts: OtpAttemptLog,
    pub created_at: DateTime<Utc>,
}
