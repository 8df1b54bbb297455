use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Enrollment step held in the cookie session. Progression is forward-only:
/// `form → otp → success`, with an explicit reset back to `form`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    #[display("form")]
    Form,
    #[display("otp")]
    Otp,
    #[display("success")]
    Success,
}

impl Step {
    /// Whitelist of permitted transitions. `form → form` and `otp → otp`
    /// cover failed submits that keep the user in place.
    pub fn can_transition_to(self, next: Step) -> bool {
        matches!(
            (self, next),
            (Step::Form, Step::Form)
                | (Step::Form, Step::Otp)
                | (Step::Otp, Step::Otp)
                | (Step::Otp, Step::Success)
                | (Step::Success, Step::Form)
        )
    }

    pub fn is_form(&self) -> bool {
        *self == Step::Form
    }

    pub fn is_otp(&self) -> bool {
        *self == Step::Otp
    }

    pub fn is_success(&self) -> bool {
        *self == Step::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Step::Form.can_transition_to(Step::Otp));
        assert!(Step::Otp.can_transition_to(Step::Success));
        assert!(Step::Success.can_transition_to(Step::Form));
    }

    #[test]
    fn test_retry_transitions_allowed() {
        assert!(Step::Form.can_transition_to(Step::Form));
        assert!(Step::Otp.can_transition_to(Step::Otp));
    }

    #[test]
    fn test_backward_and_skip_transitions_rejected() {
        assert!(!Step::Form.can_transition_to(Step::Success));
        assert!(!Step::Otp.can_transition_to(Step::Form));
        assert!(!Step::Success.can_transition_to(Step::Otp));
        assert!(!Step::Success.can_transition_to(Step::Success));
    }
}
