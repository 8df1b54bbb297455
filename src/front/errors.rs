use super::templates;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

#[derive(Debug, Display, Error)]
pub enum UserError {
    UrlNotFound,
    StepOutOfOrder,
    FormInputValueError(#[error(not(source))] String),
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        let mut context = tera::Context::new();
        error!("{:#?}", self);

        let template_name = match self {
            UserError::UrlNotFound => {
                context.insert("msg_details", "recurso no encontrado");
                "errors/url_not_found.html"
            }
            UserError::StepOutOfOrder => {
                context.insert("msg_details", "el flujo de alta no permite ese paso");
                context.insert("form_url", "/enroll");
                "errors/step_out_of_order.html"
            }
            UserError::FormInputValueError(msg) => {
                context.insert(
                    "msg_details",
                    &format!("formulario con valores invalidos: {}", msg),
                );
                context.insert("form_url", "/enroll");
                "errors/invalid_input_values.html"
            }
        };

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &context)
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            UserError::StepOutOfOrder => http::StatusCode::CONFLICT,
            UserError::FormInputValueError(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    TemplateError(#[error(not(source))] String),
    WidgetTemplateError(#[error(not(source))] String),
    /// A document-store write failed; the user sees the transport-failure
    /// page instead of an endless busy indicator
    PersistenceError(#[error(not(source))] String),
    InternalServerError(#[error(not(source))] String),
    InvalidCsrfToken,
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::TemplateError(msg) => format!("[TemplateError] {:#?}", msg),
            ServerError::WidgetTemplateError(msg) => format!("[WidgetTemplateError] {:#?}", msg),
            ServerError::PersistenceError(msg) => format!("[PersistenceError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
            ServerError::InvalidCsrfToken => "[InvalidCsrfToken]".to_string(),
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        let template_name = match self {
            // will be a success status code cause htmx should render something
            ServerError::WidgetTemplateError(_) => "errors/widget_page_err.html",
            ServerError::PersistenceError(_) => "errors/persistence_error.html",
            _ => "errors/internal_error.html",
        };

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &tera::Context::new())
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            // will be a success status code cause htmx should render something
            ServerError::WidgetTemplateError(_) => http::StatusCode::ACCEPTED,
            ServerError::PersistenceError(_) => http::StatusCode::BAD_GATEWAY,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
