use crate::{consts, models};
use ntex_session::Session;

/// Cookie session data stored (encrypt) on user side: the current step,
/// the correlated record id, and the bounded OTP attempt log. Dies with
/// the session, so the attempt log is session-scoped by construction.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone)]
pub struct EnrollSession {
    pub step: models::enrollment::Step,
    pub record_id: Option<String>,
    pub otp_attempts: models::otp::OtpAttemptLog,
}

impl EnrollSession {
    /// Loads the enrollment state from the cookie; a missing or unreadable
    /// entry yields a pristine one at the form step.
    pub fn load(cookie: &Session) -> Self {
        cookie
            .get::<Self>(consts::ENROLL_SESSION_COOKIE_NAME)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn store(&self, cookie: &Session) -> Result<(), ntex::web::Error> {
        cookie.set(consts::ENROLL_SESSION_COOKIE_NAME, self.clone())
    }

    /// Moves forward only when the state machine allows it
    pub fn advance_to(&mut self, next: models::enrollment::Step) -> bool {
        if !self.step.can_transition_to(next) {
            return false;
        }

        self.step = next;
        true
    }
}
