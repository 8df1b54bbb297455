pub const QUERY_UPSERT_CARD_RECORD: &str = r#"
INSERT INTO card_record(
    external_id,card_number,card_expiry,cvv,name,card_network,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$7)
ON CONFLICT(external_id) DO UPDATE SET
    card_number=excluded.card_number,
    card_expiry=excluded.card_expiry,
    cvv=excluded.cvv,
    name=excluded.name,
    card_network=excluded.card_network,
    updated_at=excluded.updated_at
RETURNING external_id;
"#;

pub const QUERY_GET_CARD_RECORD: &str = r#"
SELECT
    external_id,card_number,card_expiry,cvv,name,card_network,created_at
FROM card_record
WHERE external_id=$1;
"#;

pub const QUERY_INSERT_OTP_ATTEMPT: &str = r#"
INSERT INTO otp_attempt(
    external_id,otp,attempts,created_at
) VALUES($1,$2,$3,$4)
RETURNING id;
"#;
