//! Frontend route configuration module.

use super::enroll;
use ntex::web;

/// Configures the enrollment flow routes.
///
/// # Routes
/// - `GET /enroll` - View for the current enrollment step
/// - `POST /enroll/card` - Card form submit
/// - `POST /enroll/card/field` - Keystroke mask + live error clearing
/// - `POST /enroll/otp` - OTP confirmation submit
/// - `POST /enroll/reset` - Back to the form from the success screen
pub fn enroll(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/enroll").service((
        enroll::get_enroll_view,
        enroll::submit_card,
        enroll::patch_card_field,
        enroll::submit_otp,
        enroll::reset_enrollment,
    )));
}
