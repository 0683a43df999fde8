mod common;

use common::encode;
use msgunpack::{decode, decode_bytes, decode_with_consumed, DecodeError, Extension, Value};
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<u64>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-64i64..64).prop_map(Value::from),
        any::<f32>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(Value::F32),
        any::<f64>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(Value::F64),
        ".{0,40}".prop_map(Value::String),
        vec(any::<u8>(), 0..300).prop_map(Value::Binary),
        (any::<u8>(), vec(any::<u8>(), 0..20))
            .prop_map(|(tag, data)| Value::Extension(Extension::new(tag, data))),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 64, 20, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..20).prop_map(Value::Array),
            vec((inner.clone(), inner), 0..20).prop_map(Value::Map),
        ]
    })
}

proptest! {
    #[test]
    fn decode_inverts_reference_encoder(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(decode(&bytes), Ok(value));
    }

    #[test]
    fn owned_backend_agrees(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(decode_bytes(bytes.clone().into()), decode(&bytes));
    }

    #[test]
    fn one_extra_byte_is_trailing(value in arb_value(), extra in any::<u8>()) {
        let mut bytes = encode(&value);
        bytes.push(extra);
        prop_assert_eq!(decode(&bytes), Err(DecodeError::TrailingBytes(1)));
    }

    #[test]
    fn dropping_last_byte_is_truncation(value in arb_value()) {
        let mut bytes = encode(&value);
        bytes.pop();
        let is_truncated = matches!(decode(&bytes), Err(DecodeError::TruncatedInput { .. }));
        prop_assert!(is_truncated);
    }

    #[test]
    fn consumed_count_matches_encoding(first in arb_value(), second in arb_value()) {
        let mut bytes = encode(&first);
        let first_len = bytes.len();
        bytes.extend_from_slice(&encode(&second));
        prop_assert_eq!(decode_with_consumed(&bytes), Ok((first, first_len)));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in vec(any::<u8>(), 0..64)) {
        let _ = decode(&bytes);
    }
}
