use super::*;

#[test]
fn null_renders_as_literal_null() {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert!(Value::Null.is_null());
}

#[test]
fn empty_text_and_zero_are_not_null() {
    assert!(!Value::Text(String::new()).is_null());
    assert!(!Value::Int(0).is_null());
}

#[test]
fn integers_render_as_decimal_text() {
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::from(7i8).to_string(), "7");
}

#[test]
fn binary_renders_its_textual_content() {
    assert_eq!(Value::Blob(b"A777".to_vec()).to_string(), "A777");
}

#[test]
fn as_int_parses_text_and_binary() {
    assert_eq!(Value::Text("42".into()).as_int(), 42);
    assert_eq!(Value::Blob(b"0x1F".to_vec()).as_int(), 31);
    assert_eq!(Value::Text("not a number".into()).as_int(), 0);
    assert_eq!(Value::Null.as_int(), 0);
}

#[test]
fn prefixed_parsing_follows_base_prefixes() {
    let cases = [
        ("42", Some(42)),
        ("-42", Some(-42)),
        ("+7", Some(7)),
        ("0x1f", Some(31)),
        ("-0X1F", Some(-31)),
        ("0o17", Some(15)),
        ("017", Some(15)),
        ("0", Some(0)),
        ("0b101", Some(5)),
        ("1_000", Some(1000)),
        ("0x_ff", Some(255)),
        ("1__0", None),
        ("_1", None),
        ("1_", None),
        ("08", None),
        ("0x", None),
        ("", None),
        ("-", None),
        (" 1", None),
        ("9223372036854775807", Some(i64::MAX)),
        ("9223372036854775808", None),
        ("-9223372036854775808", Some(i64::MIN)),
        ("-9223372036854775809", None),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_prefixed_int(input), expected, "input: {input:?}");
    }
}

#[test]
fn decimal_parsing_rejects_prefixes_and_separators() {
    assert_eq!(parse_decimal_int("12"), Some(12));
    assert_eq!(parse_decimal_int("-12"), Some(-12));
    assert_eq!(parse_decimal_int("0x10"), None);
    assert_eq!(parse_decimal_int("1_000"), None);
    assert_eq!(parse_decimal_int(""), None);
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
}

#[test]
fn kind_reports_variant() {
    assert_eq!(Value::Blob(vec![]).kind(), ValueKind::Blob);
    assert_eq!(Value::from("a").kind().to_string(), "Text");
}
