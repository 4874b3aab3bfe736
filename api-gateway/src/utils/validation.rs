use kost_shared::{
    parse_positive_integer, sanitize_text, validate_email, BookingInput, BookingRequest,
    GatewayError, PUBLIC_SOURCE,
};

pub const REQUIRED_FIELDS_MISSING: &str = "required booking fields missing";
pub const INVALID_EMAIL: &str = "invalid email format";
pub const INVALID_DURATION: &str = "invalid duration in months";

/// 清洗并校验预订请求
pub fn validate_booking(input: &BookingInput) -> Result<BookingRequest, GatewayError> {
    let name = sanitize_text(&input.name);
    let phone = sanitize_text(&input.phone);
    let email = sanitize_text(&input.email);
    let room_id = sanitize_text(&input.room_id);
    let move_in_date = sanitize_text(&input.move_in_date);
    let duration = sanitize_text(&input.duration_months);
    let notes = sanitize_text(&input.notes);
    let source = match sanitize_text(&input.source) {
        s if s.is_empty() => PUBLIC_SOURCE.to_string(),
        s => s,
    };

    let required = [&name, &phone, &email, &room_id, &move_in_date, &duration];
    if required.iter().any(|field| field.is_empty()) {
        return Err(GatewayError::Validation(REQUIRED_FIELDS_MISSING.to_string()));
    }

    if !validate_email(&email) {
        return Err(GatewayError::Validation(INVALID_EMAIL.to_string()));
    }

    let duration_months = parse_positive_integer(&duration)
        .ok_or_else(|| GatewayError::Validation(INVALID_DURATION.to_string()))?;

    Ok(BookingRequest {
        name,
        phone,
        email,
        room_id,
        move_in_date,
        duration_months,
        notes,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn complete() -> Value {
        json!({
            "name": " Sari ",
            "phone": "081234567890",
            "email": "sari@example.com",
            "roomId": "KMR-01",
            "moveInDate": "2026-11-01",
            "durationMonths": "3"
        })
    }

    fn validate(value: Value) -> Result<BookingRequest, GatewayError> {
        let input: BookingInput = serde_json::from_value(value).unwrap();
        validate_booking(&input)
    }

    fn validation_message(result: Result<BookingRequest, GatewayError>) -> String {
        match result {
            Err(GatewayError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_booking_is_sanitized() {
        let booking = validate(complete()).unwrap();
        assert_eq!(booking.name, "Sari");
        assert_eq!(booking.duration_months, 3);
        assert_eq!(booking.notes, "");
        assert_eq!(booking.source, PUBLIC_SOURCE);
    }

    #[test]
    fn test_explicit_source_kept() {
        let mut value = complete();
        value["source"] = json!("  instagram ");
        value["notes"] = json!(" near campus ");
        let booking = validate(value).unwrap();
        assert_eq!(booking.source, "instagram");
        assert_eq!(booking.notes, "near campus");
    }

    #[test]
    fn test_each_required_field_checked() {
        for field in ["name", "phone", "email", "roomId", "moveInDate", "durationMonths"] {
            let mut missing = complete();
            missing.as_object_mut().unwrap().remove(field);
            assert_eq!(validation_message(validate(missing)), REQUIRED_FIELDS_MISSING);

            let mut blank = complete();
            blank[field] = json!("   ");
            assert_eq!(validation_message(validate(blank)), REQUIRED_FIELDS_MISSING);
        }
    }

    #[test]
    fn test_email_requires_at_sign() {
        let mut value = complete();
        value["email"] = json!("abc");
        assert_eq!(validation_message(validate(value)), INVALID_EMAIL);

        let mut value = complete();
        value["email"] = json!("a@b.com");
        assert!(validate(value).is_ok());
    }

    #[test]
    fn test_duration_must_be_positive_integer() {
        for bad in ["0", "-1", "1.5", "abc"] {
            let mut value = complete();
            value["durationMonths"] = json!(bad);
            assert_eq!(validation_message(validate(value)), INVALID_DURATION, "{}", bad);
        }

        let mut value = complete();
        value["durationMonths"] = json!(6);
        assert_eq!(validate(value).unwrap().duration_months, 6);
    }

    #[test]
    fn test_native_field_names_accepted() {
        let booking = validate(json!({
            "nama": "Budi",
            "no_hp": "0812",
            "email": "budi@example.com",
            "id_kamar": "KMR-02",
            "tgl_masuk": "2026-12-01",
            "durasi_bulan": "12",
            "sumber": "brosur"
        }))
        .unwrap();

        assert_eq!(booking.room_id, "KMR-02");
        assert_eq!(booking.duration_months, 12);
        assert_eq!(booking.source, "brosur");
    }
}
