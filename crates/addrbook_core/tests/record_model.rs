use addrbook_core::{Birthday, Phone, Record, ValidationError};

#[test]
fn phone_validation_covers_length_and_digits() {
    assert_eq!(Phone::new("0671234567").unwrap().render(), "0671234567");
    for raw in ["067123456", "06712345678", "067-123-45", "067123456a"] {
        assert!(matches!(
            Phone::new(raw),
            Err(ValidationError::InvalidPhone { .. })
        ));
    }
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let mut record = Record::new("Ann", "1111111111", None).unwrap();
    record.add_phone("2222222222").unwrap();
    record.set_birthday(Birthday::parse("15.06.1990").unwrap());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["phones"], serde_json::json!(["1111111111", "2222222222"]));
    assert_eq!(json["birthday"]["day"], 15);
    assert_eq!(json["birthday"]["month"], 6);
    assert_eq!(json["birthday"]["year"], 1990);

    let decoded: Record = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_rejects_invalid_phone() {
    let value = serde_json::json!({
        "name": "Ann",
        "phones": ["12345"],
        "birthday": null
    });

    let err = serde_json::from_value::<Record>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid phone `12345`"),
        "unexpected error: {err}"
    );
}
