//! Card enrollment flow handlers: form step, OTP confirmation and the
//! success screen, plus the htmx keystroke endpoint for live correction.

use crate::{
    api::{self, enrollment::CardField},
    config, consts,
    front::{
        AppState, errors, forms,
        middleware::csrf_token,
        session::EnrollSession,
        templates,
    },
    models,
};
use ntex::web;
use ntex_session::Session;
use serde_json::json;
use std::time::Duration;

#[derive(serde::Deserialize)]
struct EnrollQuery {
    id: Option<String>,
}

/// Fixed busy window after each submit; stands in for the asynchronous
/// confirmation of the document store
async fn settle_delay() {
    tokio::time::sleep(Duration::from_millis(config::APP_CONFIG.settle_delay_ms)).await;
}

/// Presentation attributes of one card-form input, consumed by the shared
/// `widgets/field.html` template on full renders and on keystroke patches.
fn field_descriptor(field: CardField, value: &str, error: Option<&str>) -> serde_json::Value {
    let (field_id, label, kind, inputmode, maxlength, placeholder) = match field {
        CardField::Number => (
            "card_number",
            "Número de tarjeta",
            "",
            "numeric",
            23,
            "XXXX XXXX XXXX XXXX",
        ),
        CardField::Name => (
            "holder_name",
            "Nombre del titular",
            "",
            "",
            0,
            "Nombre como aparece en la tarjeta",
        ),
        CardField::Expiry => ("card_expiry", "Fecha de expiración", "", "numeric", 5, "MM/YY"),
        CardField::Cvv => ("cvv", "CVV", "password", "numeric", 4, "XXX"),
    };

    json!({
        "field": field,
        "field_id": field_id,
        "label": label,
        "kind": kind,
        "inputmode": inputmode,
        "maxlength": maxlength,
        "placeholder": placeholder,
        "value": value,
        "error": error,
    })
}

fn card_field_widgets(
    card: &models::card::CardDetails,
    field_errors: &api::enrollment::FieldErrors,
) -> serde_json::Value {
    // the cvv is never echoed back into the page
    json!([
        field_descriptor(CardField::Number, &card.number, field_errors.number.as_deref()),
        field_descriptor(CardField::Name, &card.name, field_errors.name.as_deref()),
        field_descriptor(CardField::Expiry, &card.expiry, field_errors.expiry.as_deref()),
        field_descriptor(CardField::Cvv, "", field_errors.cvv.as_deref()),
    ])
}

fn base_page_context(state: &EnrollSession, csrf_token: &str) -> tera::Context {
    tera::Context::from_value(json!({
        "step": state.step.to_string(),
        "csrf_token": csrf_token,
        "otp_digits": consts::OTP_DIGITS,
        "oob": false,
        "fields": card_field_widgets(
            &models::card::CardDetails::default(),
            &api::enrollment::FieldErrors::default(),
        ),
    }))
    .unwrap_or_default()
}

fn field_patch_context(
    field: CardField,
    masked_value: &str,
    clear_error: bool,
    csrf_token: &str,
) -> tera::Context {
    tera::Context::from_value(json!({
        "f": field_descriptor(field, masked_value, None),
        "oob": true,
        "clear_error": clear_error,
        "csrf_token": csrf_token,
    }))
    .unwrap_or_default()
}

fn render_enroll_page(
    state: &EnrollSession,
    csrf_token: &str,
    extra: tera::Context,
) -> Result<web::HttpResponse, web::Error> {
    let mut context = base_page_context(state, csrf_token);
    context.extend(extra);

    let content = templates::WEB_TEMPLATES
        .render("enroll.html", &context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "at /enroll the template couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

/// Renders the view for the current step. The optional `id` query value is
/// read once and kept in the session to correlate this enrollment with a
/// prior record.
#[web::get("")]
async fn get_enroll_view(
    query: web::types::Query<EnrollQuery>,
    app_state: web::types::State<AppState>,
    cookie: Session,
) -> Result<impl web::Responder, web::Error> {
    let mut state = EnrollSession::load(&cookie);

    if state.record_id.is_none() {
        state.record_id = query.id.clone();
    }
    state.store(&cookie)?;

    let token = csrf_token::issue(&app_state.csrf_protec, &cookie)?;

    let mut extra = tera::Context::new();
    if state.step.is_success() {
        if let Some(record_id) = &state.record_id {
            if let Ok(Some(record)) = app_state.repo.get_card_record(record_id).await {
                extra.insert("masked_card", &record.masked());
            }
        }
    }

    render_enroll_page(&state, &token, extra)
}

/// Card-form submit: `form → otp` when every field validates, `form → form`
/// with per-field errors and an aggregate banner otherwise.
#[web::post("/card")]
async fn submit_card(
    form: web::types::Form<forms::card::CardForm>,
    app_state: web::types::State<AppState>,
    cookie: Session,
) -> Result<impl web::Responder, web::Error> {
    csrf_token::verify(&app_state.csrf_protec, &cookie, &form.csrf_token)?;

    let mut state = EnrollSession::load(&cookie);
    if !state.step.is_form() {
        return Err(errors::UserError::StepOutOfOrder.into());
    }

    let details: models::card::CardDetails = form.0.into();
    let outcome = api::enrollment::submit_card(&app_state.repo, &details, state.record_id.clone())
        .await
        .map_err(|e| {
            errors::ServerError::PersistenceError(format!("card record write failed: {e}"))
        })?;

    let token = csrf_token::issue(&app_state.csrf_protec, &cookie)?;

    match outcome {
        api::enrollment::CardSubmitOutcome::Invalid(field_errors) => {
            let mut extra = tera::Context::new();
            extra.insert("fields", &card_field_widgets(&details, &field_errors));
            extra.insert("banner", "por favor corrige los errores señalados");

            render_enroll_page(&state, &token, extra)
        }
        api::enrollment::CardSubmitOutcome::Accepted { record_id } => {
            settle_delay().await;

            state.record_id = Some(record_id);
            state.advance_to(models::enrollment::Step::Otp);
            state.store(&cookie)?;

            render_enroll_page(&state, &token, tera::Context::new())
        }
    }
}

/// Live-correction endpoint: re-renders the input with the mask applied
/// (swapped out-of-band) and clears the field error once the shape is fine.
#[web::post("/card/field")]
async fn patch_card_field(
    form: web::types::Form<forms::card::FieldPatchForm>,
    app_state: web::types::State<AppState>,
    cookie: Session,
) -> Result<impl web::Responder, web::Error> {
    csrf_token::verify(&app_state.csrf_protec, &cookie, &form.csrf_token)?;

    let masked_value = api::enrollment::apply_input_mask(form.field, &form.value);

    let mut details = models::card::CardDetails {
        number: form.card_number.to_string(),
        ..Default::default()
    };
    match form.field {
        CardField::Number => details.number = masked_value.to_string(),
        CardField::Name => details.name = masked_value.to_string(),
        CardField::Expiry => details.expiry = masked_value.to_string(),
        CardField::Cvv => details.cvv = masked_value.to_string(),
    }

    let context = field_patch_context(
        form.field,
        &masked_value,
        api::enrollment::field_shape_ok(form.field, &details),
        &form.csrf_token,
    );

    let content = templates::WEB_TEMPLATES
        .render("widgets/field.html", &context)
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "at /enroll/card/field the widget couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

/// OTP submit: the verification collaborator decides between `success`,
/// retry and pending; the attempt is logged and persisted either way.
#[web::post("/otp")]
async fn submit_otp(
    form: web::types::Form<forms::card::EnrollOtpForm>,
    app_state: web::types::State<AppState>,
    cookie: Session,
) -> Result<impl web::Responder, web::Error> {
    csrf_token::verify(&app_state.csrf_protec, &cookie, &form.csrf_token)?;

    let mut state = EnrollSession::load(&cookie);
    if !state.step.is_otp() {
        return Err(errors::UserError::StepOutOfOrder.into());
    }

    let code: String = form
        .otp_value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(consts::OTP_DIGITS)
        .collect();
    if code.is_empty() {
        return Err(errors::UserError::FormInputValueError(
            "el código de verificación está vacío".to_string(),
        )
        .into());
    }

    let outcome = api::enrollment::submit_otp(
        &app_state.repo,
        &app_state.otp_verifier,
        &code,
        &mut state.otp_attempts,
        state.record_id.clone(),
    )
    .await
    .map_err(|e| errors::ServerError::PersistenceError(format!("otp record write failed: {e}")))?;

    settle_delay().await;

    let token = csrf_token::issue(&app_state.csrf_protec, &cookie)?;
    let mut extra = tera::Context::new();

    match outcome {
        models::otp::OtpOutcome::Approved => {
            state.advance_to(models::enrollment::Step::Success);
            if let Some(record_id) = &state.record_id {
                if let Ok(Some(record)) = app_state.repo.get_card_record(record_id).await {
                    extra.insert("masked_card", &record.masked());
                }
            }
        }
        models::otp::OtpOutcome::Rejected => {
            extra.insert("banner", "el código de verificación no es correcto");
        }
        models::otp::OtpOutcome::Pending => {
            extra.insert("banner", "estamos verificando el código, intenta de nuevo");
        }
    }

    state.store(&cookie)?;
    render_enroll_page(&state, &token, extra)
}

/// Manual reset from the success screen; every piece of transient
/// enrollment state goes with it.
#[web::post("/reset")]
async fn reset_enrollment(
    form: web::types::Form<forms::card::ResetForm>,
    app_state: web::types::State<AppState>,
    cookie: Session,
) -> Result<impl web::Responder, web::Error> {
    csrf_token::verify(&app_state.csrf_protec, &cookie, &form.csrf_token)?;

    let state = EnrollSession::load(&cookie);
    if !state.step.is_success() {
        return Err(errors::UserError::StepOutOfOrder.into());
    }

    EnrollSession::default().store(&cookie)?;

    Ok(web::HttpResponse::SeeOther()
        .set_header("location", "/enroll")
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_step_wires_live_correction_for_every_field() {
        let html = templates::WEB_TEMPLATES
            .render("enroll.html", &base_page_context(&EnrollSession::default(), "tok"))
            .unwrap();

        for field_id in ["card_number", "holder_name", "card_expiry", "cvv"] {
            assert!(html.contains(&format!(r#"id="{field_id}""#)));
            assert!(html.contains(&format!(r#"id="{field_id}_hint""#)));
        }
        assert_eq!(html.matches(r#"hx-post="/enroll/card/field""#).count(), 4);
    }

    #[test]
    fn test_form_step_echoes_values_and_errors_but_never_the_cvv() {
        let mut context = base_page_context(&EnrollSession::default(), "tok");
        context.insert(
            "fields",
            &card_field_widgets(
                &models::card::CardDetails {
                    number: "4111 1111 1111 1111".to_string(),
                    cvv: "123".to_string(),
                    ..Default::default()
                },
                &api::enrollment::FieldErrors {
                    expiry: Some("la fecha de expiración no es válida".to_string()),
                    ..Default::default()
                },
            ),
        );

        let html = templates::WEB_TEMPLATES.render("enroll.html", &context).unwrap();

        assert!(html.contains(r#"value="4111 1111 1111 1111""#));
        assert!(html.contains("la fecha de expiración no es válida"));
        assert!(!html.contains("123"));
    }

    #[test]
    fn test_field_widget_oob_swap_writes_masked_value_back() {
        let html = templates::WEB_TEMPLATES
            .render(
                "widgets/field.html",
                &field_patch_context(CardField::Expiry, "12/2", true, "tok"),
            )
            .unwrap();

        assert!(html.contains(r#"id="card_expiry""#));
        assert!(html.contains(r#"value="12/2""#));
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains(r#"id="card_expiry_hint""#));
    }

    #[test]
    fn test_field_widget_keeps_error_until_shape_is_ok() {
        let html = templates::WEB_TEMPLATES
            .render(
                "widgets/field.html",
                &field_patch_context(CardField::Cvv, "12", false, "tok"),
            )
            .unwrap();

        assert!(html.contains(r#"id="cvv""#));
        assert!(!html.contains("cvv_hint"));
    }
}
