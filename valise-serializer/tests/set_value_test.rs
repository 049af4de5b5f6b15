use std::collections::BTreeMap;

use uuid::Uuid;
use valise_serializer::{set_value, try_set_value, DataType, Value};

#[test]
fn test_numeric_string_to_int() {
    let result = set_value(&Value::Str("42".into()), DataType::Int, Some(Value::Int(-1)));
    assert_eq!(result, Value::Int(42));
}

#[test]
fn test_failed_conversion_returns_default() {
    let result = set_value(&Value::Str("abc".into()), DataType::Int, Some(Value::Int(-1)));
    assert_eq!(result, Value::Int(-1));
}

#[test]
fn test_failed_conversion_without_default_is_none() {
    let result = set_value(&Value::Str("abc".into()), DataType::Int, None);
    assert_eq!(result, Value::None);
}

#[test]
fn test_try_set_value_surfaces_the_failure() {
    // The fail-soft wrapper hides errors; the fallible core does not.
    assert!(try_set_value(&Value::Str("abc".into()), DataType::Int).is_err());
    assert_eq!(
        try_set_value(&Value::Str("42".into()), DataType::Int).expect("coerce failed"),
        Value::Int(42)
    );
}

#[test]
fn test_float_to_int_truncates() {
    let result = set_value(&Value::Float(3.9), DataType::Int, None);
    assert_eq!(result, Value::Int(3));

    let result = set_value(&Value::Float(-3.9), DataType::Int, None);
    assert_eq!(result, Value::Int(-3));
}

#[test]
fn test_non_finite_float_to_int_fails_soft() {
    let result = set_value(&Value::Float(f64::NAN), DataType::Int, Some(Value::Int(0)));
    assert_eq!(result, Value::Int(0));
}

#[test]
fn test_bool_to_int_and_back() {
    assert_eq!(set_value(&Value::Bool(true), DataType::Int, None), Value::Int(1));
    assert_eq!(set_value(&Value::Int(0), DataType::Bool, None), Value::Bool(false));
    assert_eq!(set_value(&Value::Int(7), DataType::Bool, None), Value::Bool(true));
}

#[test]
fn test_string_to_float() {
    assert_eq!(
        set_value(&Value::Str(" 123.456 ".into()), DataType::Float, None),
        Value::Float(123.456)
    );
}

#[test]
fn test_string_to_bool_is_strict() {
    assert_eq!(set_value(&Value::Str("true".into()), DataType::Bool, None), Value::Bool(true));
    assert_eq!(
        set_value(&Value::Str("yes".into()), DataType::Bool, Some(Value::Bool(false))),
        Value::Bool(false)
    );
}

#[test]
fn test_anything_to_string() {
    assert_eq!(set_value(&Value::Int(14), DataType::Str, None), Value::Str("14".into()));
    assert_eq!(set_value(&Value::Bool(true), DataType::Str, None), Value::Str("true".into()));
    assert_eq!(set_value(&Value::None, DataType::Str, None), Value::Str(String::new()));

    let mut map = BTreeMap::new();
    map.insert("key".to_string(), Value::Int(2));
    assert_eq!(
        set_value(&Value::Dict(map), DataType::Str, None),
        Value::Str("{\"key\":2}".into())
    );
}

#[test]
fn test_json_text_to_dict() {
    let result = set_value(&Value::Str("{\"a\": 1}".into()), DataType::Dict, None);
    let mut expected = BTreeMap::new();
    expected.insert("a".to_string(), Value::Int(1));
    assert_eq!(result, Value::Dict(expected));
}

#[test]
fn test_list_tuple_interchange() {
    let items = vec![Value::Int(1), Value::Int(2)];
    assert_eq!(
        set_value(&Value::List(items.clone()), DataType::Tuple, None),
        Value::Tuple(items.clone())
    );
    assert_eq!(
        set_value(&Value::Tuple(items.clone()), DataType::List, None),
        Value::List(items)
    );
}

#[test]
fn test_string_to_uuid_checks_version() {
    let v4 = Uuid::new_v4();
    let text = Value::Str(v4.to_string());

    assert_eq!(set_value(&text, DataType::Uuid4, None), Value::Uuid(v4));
    // Same string under the wrong version tag fails back to the default.
    assert_eq!(set_value(&text, DataType::Uuid1, None), Value::None);
}

#[test]
fn test_target_none_always_converts() {
    assert_eq!(set_value(&Value::Int(5), DataType::None, None), Value::None);
}

#[test]
fn test_no_side_effects_on_input() {
    let original = Value::Str("42".into());
    let _ = set_value(&original, DataType::Int, None);
    assert_eq!(original, Value::Str("42".into()));
}
