pub mod enroll;
pub mod errors;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod templates;

use crate::{repo, services};
use csrf::AesGcmCsrfProtection;

pub struct AppState {
    pub csrf_protec: AesGcmCsrfProtection,
    pub repo: repo::ImplEnrollRepo,
    pub otp_verifier: services::ImplOtpVerifier,
}
