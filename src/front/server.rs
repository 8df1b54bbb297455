//! Handlers not linked to a specific url

use crate::front::errors;
use ntex::web;

/// The flow lives under `/enroll`; the root just forwards there
#[web::get("/")]
async fn index() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::SeeOther()
        .set_header("location", "/enroll")
        .finish())
}

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}
