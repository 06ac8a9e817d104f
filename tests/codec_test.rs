//! Codec round-trip law and mapping behavior, through the public surface.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use stanza::prelude::*;

fn pg_env() -> MappingEnv {
    MappingEnv::new(Dialect::Postgres15.server())
}

fn mysql_env() -> MappingEnv {
    MappingEnv::new(Dialect::MySql80.server())
}

/// `after_get(before_bind(v)) == v` for every codec and valid value.
fn assert_round_trip(key: CodecKey, value: Value, env: &MappingEnv) {
    let codec = codec_for(&key);
    let data_type = codec.map(&env.server).unwrap();
    let bound = codec.before_bind(&data_type, env, &value).unwrap();
    let back = codec.after_get(&data_type, env, bound.into_value()).unwrap();
    assert_eq!(back, value, "round trip failed for {:?}", key);
}

#[test]
fn test_round_trip_scalars() {
    let env = pg_env();
    assert_round_trip(CodecKey::Bool, Value::Bool(true), &env);
    assert_round_trip(CodecKey::YesNo, Value::Bool(false), &env);
    assert_round_trip(CodecKey::I8, Value::I8(-7), &env);
    assert_round_trip(CodecKey::I16, Value::I16(300), &env);
    assert_round_trip(CodecKey::I32, Value::I32(70_000), &env);
    assert_round_trip(CodecKey::I64, Value::I64(1 << 40), &env);
    assert_round_trip(CodecKey::F32, Value::F32(1.5), &env);
    assert_round_trip(CodecKey::F64, Value::F64(-2.25), &env);
    assert_round_trip(CodecKey::Decimal, Value::Decimal(Decimal::new(12345, 2)), &env);
    assert_round_trip(CodecKey::text(), Value::Str("héllo".into()), &env);
    assert_round_trip(
        CodecKey::Binary(TextWidth::Regular),
        Value::Bytes(vec![0, 1, 2, 255]),
        &env,
    );
    assert_round_trip(CodecKey::Uuid, Value::Uuid(Uuid::from_u128(7)), &env);
}

#[test]
fn test_round_trip_unsigned_on_mysql() {
    assert_round_trip(CodecKey::U64, Value::U64(u64::MAX), &mysql_env());
}

#[test]
fn test_round_trip_temporal() {
    let env = pg_env();
    assert_round_trip(
        CodecKey::Date,
        Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
        &env,
    );
    assert_round_trip(
        CodecKey::Time,
        Value::Time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
        &env,
    );
    assert_round_trip(
        CodecKey::DateTime,
        Value::DateTime(NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveTime::from_hms_opt(3, 4, 5).unwrap(),
        )),
        &env,
    );
}

#[test]
fn test_round_trip_enums() {
    let env = mysql_env();
    let def = EnumDef::with_text("weekday", &[("Monday", "MON"), ("Tuesday", "TUE")]);
    assert_round_trip(
        CodecKey::EnumByName(def.clone()),
        Value::Str("Monday".into()),
        &env,
    );
    assert_round_trip(CodecKey::EnumByText(def), Value::Str("Tuesday".into()), &env);
}

#[test]
fn test_round_trip_array_and_range() {
    let env = pg_env();
    assert_round_trip(
        CodecKey::array(CodecKey::I32),
        Value::Array(vec![Value::I32(1), Value::Null, Value::I32(3)]),
        &env,
    );
    assert_round_trip(
        CodecKey::array(CodecKey::text()),
        Value::Array(vec![
            Value::Str("a b".into()),
            Value::Str(String::new()),
            Value::Str("NULL".into()),
        ]),
        &env,
    );
    // Two-dimensional.
    assert_round_trip(
        CodecKey::array(CodecKey::I64),
        Value::Array(vec![
            Value::Array(vec![Value::I64(1), Value::I64(2)]),
            Value::Array(vec![Value::I64(3), Value::I64(4)]),
        ]),
        &env,
    );
    assert_round_trip(
        CodecKey::range(CodecKey::I32),
        Value::Range(Box::new(RangeValue::Span {
            lower: RangeBound::inclusive(Value::I32(1)),
            upper: RangeBound::inclusive(Value::I32(4)),
        })),
        &env,
    );
    assert_round_trip(
        CodecKey::range(CodecKey::I32),
        Value::Range(Box::new(RangeValue::Empty)),
        &env,
    );
}

#[test]
fn test_bit_codec_normalizes_all_shapes() {
    let env = mysql_env();
    let codec = codec_for(&CodecKey::Bit(8));
    let data_type = codec.map(&env.server).unwrap();
    let from_long = codec
        .before_bind(&data_type, &env, &Value::I64(5))
        .unwrap();
    let from_bits = codec
        .before_bind(
            &data_type,
            &env,
            &Value::Bits(vec![true, false, true]),
        )
        .unwrap();
    let from_text = codec
        .before_bind(&data_type, &env, &Value::Str("101".into()))
        .unwrap();
    assert_eq!(from_long, from_bits);
    assert_eq!(from_long, from_text);
}

#[test]
fn test_blob_ceilings() {
    let env = mysql_env();
    let tiny = codec_for(&CodecKey::Binary(TextWidth::Tiny));
    let regular = codec_for(&CodecKey::Binary(TextWidth::Regular));
    let oversized = Value::Bytes(vec![0u8; 0x8000]);
    let fits = Value::Bytes(vec![0u8; 0x7E]);

    let dt = tiny.map(&env.server).unwrap();
    assert!(matches!(
        tiny.before_bind(&dt, &env, &oversized),
        Err(SqlError::ValueOutOfRange { .. })
    ));
    assert!(tiny.before_bind(&dt, &env, &fits).is_ok());

    let dt = regular.map(&env.server).unwrap();
    assert!(matches!(
        regular.before_bind(&dt, &env, &oversized),
        Err(SqlError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_family_restricted_codecs() {
    // Unsigned 64-bit has no Postgres type.
    let codec = codec_for(&CodecKey::U64);
    assert!(matches!(
        codec.map(&Dialect::Postgres15.server()),
        Err(SqlError::UnsupportedDialect { .. })
    ));
    // Arrays and ranges have no MySQL type.
    for key in [CodecKey::array(CodecKey::I32), CodecKey::range(CodecKey::I32)] {
        let codec = codec_for(&key);
        assert!(matches!(
            codec.map(&Dialect::MySql80.server()),
            Err(SqlError::UnsupportedDialect { .. })
        ));
    }
}

#[test]
fn test_type_mismatch_is_eager() {
    let env = pg_env();
    let codec = codec_for(&CodecKey::I32);
    let dt = codec.map(&env.server).unwrap();
    assert!(matches!(
        codec.before_bind(&dt, &env, &Value::Str("5".into())),
        Err(SqlError::TypeMismatch { .. })
    ));
}

#[test]
fn test_param_error_hook_wraps() {
    use std::sync::Arc;
    let env = MappingEnv::new(Dialect::Postgres15.server()).with_param_hook(Arc::new(
        |_codec, data_type, value, _cause| SqlError::ValueOutOfRange {
            value: value.clone(),
            limit: "hooked".into(),
            data_type: data_type.clone(),
        },
    ));
    let codec = codec_for(&CodecKey::I32);
    let dt = codec.map(&env.server).unwrap();
    let err = codec
        .before_bind(&dt, &env, &Value::Str("5".into()))
        .unwrap_err();
    match err {
        SqlError::ValueOutOfRange { limit, .. } => assert_eq!(limit, "hooked"),
        other => panic!("hook not applied: {other}"),
    }
}

#[test]
fn test_access_error_hook_wraps() {
    use std::sync::Arc;
    let env = MappingEnv::new(Dialect::Postgres15.server()).with_access_hook(Arc::new(
        |_codec, data_type, value, _cause| SqlError::Access {
            expected: "hooked",
            value: value.clone(),
            data_type: data_type.clone(),
        },
    ));
    let codec = codec_for(&CodecKey::Bool);
    let dt = codec.map(&env.server).unwrap();
    let err = codec
        .after_get(&dt, &env, Value::Str("maybe".into()))
        .unwrap_err();
    assert!(matches!(err, SqlError::Access { expected: "hooked", .. }));
}

#[test]
fn test_mapping_resolves_per_family() {
    let key = CodecKey::DateTime;
    let codec = codec_for(&key);
    let pg = codec.map(&Dialect::Postgres15.server()).unwrap();
    let my = codec.map(&Dialect::MySql80.server()).unwrap();
    assert_eq!(pg.type_name(), "TIMESTAMP");
    assert_eq!(my.type_name(), "DATETIME");
}

#[test]
fn test_array_parse_serialize_law_through_public_surface() {
    let parse_leaf = |s: &str| -> SqlResult<i64> {
        s.parse::<i64>()
            .map_err(|_| SqlError::MalformedLiteral {
                text: s.into(),
                reason: "not an integer".into(),
            })
    };
    for text in ["{1,2,3}", "{{1,2},{3,4}}", "{}", "{1,NULL,3}"] {
        let parsed = parse_array(text, ',', &parse_leaf).unwrap();
        assert_eq!(serialize_array(&parsed, ',', &|n: &i64| n.to_string()), text);
    }
}

#[test]
fn test_range_parse_through_public_surface() {
    let parse_leaf = |s: &str| -> SqlResult<i64> {
        s.parse::<i64>()
            .map_err(|_| SqlError::MalformedLiteral {
                text: s.into(),
                reason: "not an integer".into(),
            })
    };
    match parse_range("[1,4]", &parse_leaf).unwrap() {
        stanza::text::RangeText::Span { lower, upper } => {
            assert_eq!(lower.value, Some(1));
            assert!(lower.inclusive);
            assert_eq!(upper.value, Some(4));
            assert!(upper.inclusive);
        }
        stanza::text::RangeText::Empty => panic!("expected a span"),
    }
    assert!(matches!(
        parse_range("empty", &parse_leaf).unwrap(),
        stanza::text::RangeText::Empty
    ));
}
