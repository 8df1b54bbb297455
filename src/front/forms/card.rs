use crate::{api::enrollment::CardField, card::format, models};

#[derive(serde::Deserialize, Debug, Default)]
pub struct CardForm {
    pub card_number: String,
    pub holder_name: String,
    pub card_expiry: String,
    pub cvv: String,
    pub csrf_token: String,
}

impl From<CardForm> for models::card::CardDetails {
    fn from(val: CardForm) -> Self {
        // values can arrive raw when scripting is off; re-apply the masks
        models::card::CardDetails {
            number: format::format_card_number(&val.card_number),
            name: val.holder_name.trim().to_string(),
            expiry: format::format_expiry(&val.card_expiry),
            cvv: val.cvv.chars().filter(|c| c.is_ascii_digit()).take(4).collect(),
        }
    }
}

/// Keystroke payload for the live-correction endpoint. `card_number` rides
/// along so the CVV shape can follow the currently detected network.
#[derive(serde::Deserialize, Debug)]
pub struct FieldPatchForm {
    pub field: CardField,
    pub value: String,
    #[serde(default)]
    pub card_number: String,
    pub csrf_token: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct EnrollOtpForm {
    pub otp_value: String,
    pub csrf_token: String,
}

/// The success screen posts nothing but the token
#[derive(serde::Deserialize, Debug)]
pub struct ResetForm {
    pub csrf_token: String,
}
