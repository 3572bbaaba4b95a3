use datadiff_core::{
    arith::{ArithAlphanumeric, ArithUuid},
    ArithString,
};
use uuid::Uuid;

#[test]
fn uuid_displays_hyphenated() {
    let value = ArithString::uuid(Uuid::from_u128(0x1234));
    assert_eq!(value.to_string(), "00000000-0000-0000-0000-000000001234");
}

#[test]
fn uuid_order_matches_integer_order() {
    let lo = ArithString::uuid(Uuid::from_u128(10));
    let hi = ArithString::uuid(Uuid::from_u128(u128::MAX - 1));
    assert!(lo < hi);
    assert!(lo.to_int().unwrap() < hi.to_int().unwrap());
}

#[test]
fn uuid_add_and_distance() {
    let start = ArithUuid::parse("00000000-0000-0000-0000-0000000000ff").unwrap();
    let next = start.add(1).unwrap();
    assert_eq!(next.to_string(), "00000000-0000-0000-0000-000000000100");
    assert_eq!(next.distance(&start).unwrap(), 1);
    assert_eq!(start.distance(&next).unwrap(), -1);
    assert_eq!(next.add(-1).unwrap(), start);
}

#[test]
fn uuid_add_overflow_is_invalid_literal() {
    let max = ArithUuid::from_int(u128::MAX);
    let err = max.add(1).unwrap_err();
    assert!(err.is_invalid_literal());
}

#[test]
fn uuid_parse_failure() {
    assert!(ArithUuid::parse("not-a-uuid").is_err());
}

#[test]
fn alphanumeric_rejects_punctuation() {
    let err = ArithString::alphanumeric("abc'; DROP TABLE x").unwrap_err();
    assert!(err.is_invalid_literal());
}

#[test]
fn alphanumeric_integer_view() {
    let value = ArithAlphanumeric::new("10").unwrap();
    assert_eq!(value.to_int().unwrap(), 62);

    let value = ArithAlphanumeric::new("z").unwrap();
    assert_eq!(value.to_int().unwrap(), 61);

    let value = ArithAlphanumeric::new("A").unwrap();
    assert_eq!(value.to_int().unwrap(), 10);
}

#[test]
fn alphanumeric_add_keeps_length() {
    let value = ArithAlphanumeric::new("0z").unwrap();
    let next = value.add(1).unwrap();
    assert_eq!(next.as_str(), "10");

    let padded = ArithAlphanumeric::new("0000").unwrap().add(62).unwrap();
    assert_eq!(padded.as_str(), "0010");
}

#[test]
fn alphanumeric_add_past_width_fails() {
    let value = ArithAlphanumeric::new("zz").unwrap();
    assert!(value.add(1).unwrap_err().is_invalid_literal());
}

#[test]
fn alphanumeric_string_order_matches_integer_order() {
    let values = ["0A", "0a", "1Z", "Za", "zz"];
    for pair in values.windows(2) {
        let lhs = ArithAlphanumeric::new(pair[0]).unwrap();
        let rhs = ArithAlphanumeric::new(pair[1]).unwrap();
        assert!(lhs < rhs);
        assert!(lhs.to_int().unwrap() < rhs.to_int().unwrap());
    }
}

#[test]
fn distance_between_kinds_fails() {
    let uuid = ArithString::uuid(Uuid::nil());
    let code = ArithString::alphanumeric("abc").unwrap();
    assert!(uuid.distance(&code).unwrap_err().is_invalid_literal());
}
