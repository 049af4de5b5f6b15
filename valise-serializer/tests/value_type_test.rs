use std::collections::BTreeMap;

use uuid::Uuid;
use valise_serializer::{get_value_type, DataType, SerialError, Value};

#[test]
fn test_scalar_classification() {
    assert_eq!(
        get_value_type(&Value::None, false).expect("classify failed"),
        DataType::None
    );
    assert_eq!(
        get_value_type(&Value::Int(14), false).expect("classify failed"),
        DataType::Int
    );
    assert_eq!(
        get_value_type(&Value::Float(0.123), false).expect("classify failed"),
        DataType::Float
    );
    assert_eq!(
        get_value_type(&Value::Str("a string".into()), false).expect("classify failed"),
        DataType::Str
    );
    assert_eq!(
        get_value_type(&Value::Bytes(b"raw".to_vec()), false).expect("classify failed"),
        DataType::Bytes
    );
}

#[test]
fn test_boolean_never_classifies_as_int() {
    for flag in [true, false] {
        let data_type = get_value_type(&Value::Bool(flag), false).expect("classify failed");
        assert_eq!(data_type, DataType::Bool);
        assert_ne!(data_type, DataType::Int);
    }
}

#[test]
fn test_int_never_classifies_as_bool() {
    for n in [0i64, 1, -1] {
        let data_type = get_value_type(&Value::Int(n), false).expect("classify failed");
        assert_eq!(data_type, DataType::Int);
    }
}

#[test]
fn test_uuid_string_is_a_string() {
    // A UUID-shaped string is still a string; only Value::Uuid classifies
    // as a uuid kind.
    let data = Value::Str("d5bf0b08-38a3-4116-8a7c-2655e6b54b64".into());
    assert_eq!(
        get_value_type(&data, false).expect("classify failed"),
        DataType::Str
    );
}

#[test]
fn test_container_classification() {
    let empty_dict = Value::Dict(BTreeMap::new());
    assert_eq!(
        get_value_type(&empty_dict, false).expect("classify failed"),
        DataType::Dict
    );

    let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(
        get_value_type(&list, false).expect("classify failed"),
        DataType::List
    );

    let tuple = Value::Tuple(vec![Value::Str("a".into())]);
    assert_eq!(
        get_value_type(&tuple, false).expect("classify failed"),
        DataType::Tuple
    );
}

#[test]
fn test_uuid_classified_by_version() {
    let v1: Uuid = "c232ab00-9414-11ec-b3c8-9f68deced846".parse().expect("v1 parse");
    assert_eq!(
        get_value_type(&Value::Uuid(v1), false).expect("classify failed"),
        DataType::Uuid1
    );

    let v3 = Uuid::new_v3(&Uuid::NAMESPACE_DNS, b"valise.example");
    assert_eq!(
        get_value_type(&Value::Uuid(v3), false).expect("classify failed"),
        DataType::Uuid3
    );

    let v4 = Uuid::new_v4();
    assert_eq!(
        get_value_type(&Value::Uuid(v4), false).expect("classify failed"),
        DataType::Uuid4
    );

    let v5 = Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"valise.example");
    assert_eq!(
        get_value_type(&Value::Uuid(v5), false).expect("classify failed"),
        DataType::Uuid5
    );
}

#[test]
fn test_uuid_without_recoverable_version_fails() {
    let nil = Value::Uuid(Uuid::nil());
    assert!(matches!(
        get_value_type(&nil, false),
        Err(SerialError::UnsupportedType(_))
    ));

    // Version 7 exists in the wild but has no tag in the closed set.
    let v7: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse().expect("v7 parse");
    assert!(matches!(
        get_value_type(&Value::Uuid(v7), false),
        Err(SerialError::UnsupportedType(_))
    ));
}

#[test]
fn test_json_only_accepts_native_kinds() {
    let natives = [
        Value::None,
        Value::Int(7),
        Value::Float(1.5),
        Value::Str("ok".into()),
        Value::Bool(true),
        Value::Dict(BTreeMap::new()),
        Value::List(vec![]),
    ];
    for value in natives {
        assert!(get_value_type(&value, true).is_ok(), "rejected {value:?}");
    }
}

#[test]
fn test_json_only_rejects_richer_kinds() {
    let rich = [
        Value::Bytes(b"raw".to_vec()),
        Value::Tuple(vec![]),
        Value::Uuid(Uuid::new_v4()),
    ];
    for value in rich {
        assert!(
            matches!(
                get_value_type(&value, true),
                Err(SerialError::UnsupportedType(_))
            ),
            "accepted {value:?}"
        );
    }
}

#[test]
fn test_classification_is_deterministic() {
    let value = Value::List(vec![Value::Bool(true), Value::Int(3)]);
    let first = get_value_type(&value, false).expect("classify failed");
    let second = get_value_type(&value.clone(), false).expect("classify failed");
    assert_eq!(first, second);
}
