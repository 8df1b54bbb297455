//! Double-submit csrf protection for the enrollment forms: the cookie half
//! of the pair stays inside the private session, the token half is rendered
//! into each step form as a hidden `csrf_token` field and posted back.

use base64::{Engine, prelude::BASE64_STANDARD};
use csrf::{AesGcmCsrfProtection, CsrfProtection};
use ntex_session::Session;

use crate::{consts, front::errors};

/// Generates a fresh pair, keeps the cookie half in the session and returns
/// the token half for the templates.
pub fn issue(
    protec: &AesGcmCsrfProtection,
    cookie: &Session,
) -> Result<String, errors::ServerError> {
    let (csrf_token, csrf_cookie) = protec
        .generate_token_pair(None, consts::MAX_AGE_COOKIES)
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!("cant set token csrf protection: {e}"))
        })?;

    cookie
        .set(consts::CSRF_TOKEN_COOKIE_NAME, csrf_cookie.b64_string())
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!("cant store csrf cookie: {e}"))
        })?;

    Ok(csrf_token.b64_string())
}

/// Checks the token half posted by a form against the cookie half kept in
/// the session.
pub fn verify(
    protec: &AesGcmCsrfProtection,
    cookie: &Session,
    posted_token_b64: &str,
) -> Result<(), errors::ServerError> {
    let cookie_b64 = cookie
        .get::<String>(consts::CSRF_TOKEN_COOKIE_NAME)
        .ok()
        .flatten()
        .ok_or(errors::ServerError::InvalidCsrfToken)?;

    if verify_pair(protec, posted_token_b64, &cookie_b64) {
        Ok(())
    } else {
        Err(errors::ServerError::InvalidCsrfToken)
    }
}

fn verify_pair(protec: &AesGcmCsrfProtection, token_b64: &str, cookie_b64: &str) -> bool {
    let token = BASE64_STANDARD
        .decode(token_b64.as_bytes())
        .ok()
        .and_then(|raw| protec.parse_token(&raw).ok());
    let cookie = BASE64_STANDARD
        .decode(cookie_b64.as_bytes())
        .ok()
        .and_then(|raw| protec.parse_cookie(&raw).ok());

    match (token, cookie) {
        (Some(token), Some(cookie)) => protec.verify_token_pair(&token, &cookie).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protec() -> AesGcmCsrfProtection {
        AesGcmCsrfProtection::from_key([7u8; 32])
    }

    #[test]
    fn test_issued_pair_verifies() {
        let protec = protec();
        let (token, cookie) = protec.generate_token_pair(None, 300).unwrap();

        assert!(verify_pair(&protec, &token.b64_string(), &cookie.b64_string()));
    }

    #[test]
    fn test_token_from_another_pair_is_rejected() {
        let protec = protec();
        let (token, _) = protec.generate_token_pair(None, 300).unwrap();
        let (_, other_cookie) = protec.generate_token_pair(None, 300).unwrap();

        assert!(!verify_pair(
            &protec,
            &token.b64_string(),
            &other_cookie.b64_string()
        ));
    }

    #[test]
    fn test_garbage_halves_are_rejected() {
        let protec = protec();
        let (_, cookie) = protec.generate_token_pair(None, 300).unwrap();

        assert!(!verify_pair(&protec, "no es base64", &cookie.b64_string()));
        assert!(!verify_pair(&protec, &BASE64_STANDARD.encode(b"short"), &cookie.b64_string()));
    }
}
