use crate::card::validate::{self, CardNetwork};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw field values as typed in the form. Transient: they only travel from
/// the submitted form into the persisted [CardRecord].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvv: String,
}

/// Document persisted on an accepted card submit, tagged with the network
/// detected from the submitted number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub external_id: Option<String>,
    pub card_number: String,
    pub card_expiry: String,
    pub cvv: String,
    pub name: String,
    pub card_network: CardNetwork,
    pub created_at: DateTime<Utc>,
}

impl CardRecord {
    pub fn from_details(
        details: &CardDetails,
        external_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id,
            card_number: details.number.to_string(),
            card_expiry: details.expiry.to_string(),
            cvv: details.cvv.to_string(),
            name: details.name.to_string(),
            card_network: CardNetwork::detect(&details.number),
            created_at,
        }
    }

    /// PAN with everything but the last four digits hidden, grouped in
    /// blocks of 4
    pub fn masked(&self) -> String {
        let digits: Vec<char> = validate::digits_of(&self.card_number).chars().collect();
        let visible_from = digits.len().saturating_sub(4);
        let mut masked = String::with_capacity(digits.len() + digits.len() / 4);

        for (position, digit) in digits.iter().enumerate() {
            if position > 0 && position % 4 == 0 {
                masked.push(' ');
            }
            masked.push(if position < visible_from { '•' } else { *digit });
        }

        masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_details_tags_network() {
        let record = CardRecord::from_details(
            &CardDetails {
                number: "4111 1111 1111 1111".to_string(),
                name: "Ana Torres".to_string(),
                expiry: "12/29".to_string(),
                cvv: "123".to_string(),
            },
            None,
            Utc::now(),
        );

        assert_eq!(record.card_network, CardNetwork::Visa);
        assert!(record.external_id.is_none());
    }

    #[test]
    fn test_masked_keeps_last_four() {
        let record = CardRecord::from_details(
            &CardDetails {
                number: "4111 1111 1111 1111".to_string(),
                ..CardDetails::default()
            },
            None,
            Utc::now(),
        );

        assert_eq!(record.masked(), "•••• •••• •••• 1111");
    }
}
