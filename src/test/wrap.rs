use crate::error::ErrorKind;
use crate::{from_base64, from_hex, nbt, to_base64, to_hex, Value};

#[test]
fn hex_golden_vector() {
    // Tag id 0x01, empty root name, payload 0x01.
    assert_eq!("01000001", to_hex(&Value::Byte(1)).unwrap());
    assert_eq!(Value::Byte(1), from_hex("01000001").unwrap());
    // Uppercase input decodes to the same bytes.
    assert_eq!(Value::Byte(1), from_hex("01000001".to_uppercase().as_str()).unwrap());
}

#[test]
fn base64_golden_vector() {
    assert_eq!("AQAAAQ==", to_base64(&Value::Byte(1)).unwrap());
    assert_eq!(Value::Byte(1), from_base64("AQAAAQ==").unwrap());
}

#[test]
fn compound_round_trips_through_both() {
    let doc = nbt!({
        "name": "dragon",
        "health": 20,
        "bytes": [B; 1, 2, 3],
        "nested": {"xs": [1, 2]},
    });
    assert_eq!(doc, from_hex(&to_hex(&doc).unwrap()).unwrap());
    assert_eq!(doc, from_base64(&to_base64(&doc).unwrap()).unwrap());
}

#[test]
fn hex_output_is_lowercase() {
    let doc = nbt!({"k": Value::Byte(-1)});
    let hex = to_hex(&doc).unwrap();
    assert!(hex.chars().all(|c| !c.is_ascii_uppercase()));
}

#[test]
fn invalid_hex_rejected() {
    let err = from_hex("abc").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidHex));
    assert!(err.to_string().contains("odd input length: 3"));

    let err = from_hex("zz").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidHex));
}

#[test]
fn invalid_base64_rejected() {
    let err = from_base64("not base64!!").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidBase64));
}

#[test]
fn valid_wrapper_invalid_nbt() {
    // "ff" is perfectly fine hex, but tag id 0xff is not NBT. The failure
    // must come from the binary layer, not the text layer.
    let err = from_hex("ff").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedBinary));

    let err = from_base64(&base64::encode([0xffu8])).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedBinary));
}
