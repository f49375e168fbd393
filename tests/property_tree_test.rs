//! Integration tests for PropertyTree path resolution and typed accessors.

use std::thread;

use rstest::rstest;

use proptree::domain::{Kind, PropertyError, PropertyTree, PropertyValue, Value, ValueMap};
use proptree::util::testing::init_test_setup;

fn tree(entries: Vec<(&str, Value)>) -> PropertyTree {
    init_test_setup();
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<ValueMap>(),
    )
}

fn kind_mismatch(path: &str, expected: Kind, actual: Kind) -> PropertyError {
    PropertyError::KindMismatch {
        path: path.to_string(),
        expected,
        actual,
    }
}

fn not_a_list(path: &str, expected: Kind, actual: Kind) -> PropertyError {
    PropertyError::NotAList {
        path: path.to_string(),
        expected,
        actual,
    }
}

fn element_mismatch(path: &str, expected: Kind, actual: Kind) -> PropertyError {
    PropertyError::ListElementMismatch {
        path: path.to_string(),
        expected,
        actual,
    }
}

// ============================================================
// Empty tree
// ============================================================

#[test]
fn given_empty_tree_when_empty_path_then_tree_itself() {
    let props = tree(vec![]);

    assert!(props.properties_value("").unwrap().ptr_eq(&props));
    match props.value("").unwrap() {
        Some(PropertyValue::Properties(inner)) => assert!(inner.ptr_eq(&props)),
        other => panic!("expected the tree itself, got {other:?}"),
    }
}

#[test]
fn given_empty_tree_when_typed_accessors_on_empty_path_then_actual_is_properties() {
    let props = tree(vec![]);

    assert_eq!(
        props.integer_value("").unwrap_err(),
        kind_mismatch("", Kind::Integer, Kind::Properties)
    );
    assert_eq!(
        props.double_value("").unwrap_err(),
        kind_mismatch("", Kind::Double, Kind::Properties)
    );
    assert_eq!(
        props.string_value("").unwrap_err().to_string(),
        "Expected property value of String type, but actual is Properties. Path ''"
    );
    assert_eq!(
        props.integer_list("").unwrap_err(),
        not_a_list("", Kind::Integer, Kind::Properties)
    );
    assert_eq!(
        props.properties_list("").unwrap_err().to_string(),
        "Expected property list values of type Properties, but actual is single value of type Properties. Path ''"
    );
}

#[test]
fn given_empty_tree_when_missing_key_then_every_typed_accessor_not_found() {
    let props = tree(vec![]);
    let path = "key";
    let not_found = PropertyError::NotFound {
        path: path.to_string(),
    };

    assert_eq!(props.value(path).unwrap(), None);
    assert_eq!(props.integer_value(path).unwrap_err(), not_found);
    assert_eq!(props.double_value(path).unwrap_err(), not_found);
    assert_eq!(props.string_value(path).unwrap_err(), not_found);
    assert_eq!(props.properties_value(path).unwrap_err(), not_found);
    assert_eq!(props.integer_list(path).unwrap_err(), not_found);
    assert_eq!(props.double_list(path).unwrap_err(), not_found);
    assert_eq!(props.string_list(path).unwrap_err(), not_found);
    assert_eq!(props.properties_list(path).unwrap_err(), not_found);
    assert_eq!(
        not_found.to_string(),
        "Property does not exist. Path 'key'"
    );
}

// ============================================================
// Single values
// ============================================================

#[rstest]
#[case::integer(Value::from(123), Kind::Integer)]
#[case::double(Value::from(2.75), Kind::Double)]
#[case::string(Value::from("def"), Kind::String)]
#[case::properties(map(vec![]), Kind::Properties)]
#[case::list(Value::from(vec![1, 2, 3]), Kind::List)]
fn given_value_of_kind_when_single_accessors_then_only_matching_succeeds(
    #[case] value: Value,
    #[case] actual: Kind,
) {
    let path = "key";
    let props = tree(vec![(path, value)]);

    let integer = props.integer_value(path);
    if actual == Kind::Integer {
        assert_eq!(integer.unwrap(), 123);
    } else {
        assert_eq!(integer.unwrap_err(), kind_mismatch(path, Kind::Integer, actual));
    }

    let double = props.double_value(path);
    if actual == Kind::Double {
        assert_eq!(double.unwrap(), 2.75);
    } else {
        assert_eq!(double.unwrap_err(), kind_mismatch(path, Kind::Double, actual));
    }

    let string = props.string_value(path);
    if actual == Kind::String {
        assert_eq!(string.unwrap(), "def");
    } else {
        assert_eq!(string.unwrap_err(), kind_mismatch(path, Kind::String, actual));
    }

    let properties = props.properties_value(path);
    if actual == Kind::Properties {
        assert_eq!(properties.unwrap().size(), 0);
    } else {
        assert_eq!(
            properties.unwrap_err(),
            kind_mismatch(path, Kind::Properties, actual)
        );
    }
}

#[rstest]
#[case::integer(Value::from(123), Kind::Integer)]
#[case::double(Value::from(2.75), Kind::Double)]
#[case::string(Value::from("def"), Kind::String)]
#[case::properties(map(vec![]), Kind::Properties)]
fn given_single_value_when_list_accessors_then_not_a_list(
    #[case] value: Value,
    #[case] actual: Kind,
) {
    let path = "key";
    let props = tree(vec![(path, value)]);

    assert_eq!(
        props.integer_list(path).unwrap_err(),
        not_a_list(path, Kind::Integer, actual)
    );
    assert_eq!(
        props.double_list(path).unwrap_err(),
        not_a_list(path, Kind::Double, actual)
    );
    assert_eq!(
        props.string_list(path).unwrap_err(),
        not_a_list(path, Kind::String, actual)
    );
    assert_eq!(
        props.properties_list(path).unwrap_err(),
        not_a_list(path, Kind::Properties, actual)
    );
}

#[test]
fn given_integer_when_double_value_then_message_names_both_kinds() {
    let props = tree(vec![("key", Value::from(123))]);
    assert_eq!(
        props.double_value("key").unwrap_err().to_string(),
        "Expected property value of Double type, but actual is Integer. Path 'key'"
    );
    assert_eq!(
        props.integer_list("key").unwrap_err().to_string(),
        "Expected property list values of type Integer, but actual is single value of type Integer. Path 'key'"
    );
}

#[rstest]
#[case::integer(Value::from(7), PropertyValue::Integer(7))]
#[case::double(Value::from(2.5), PropertyValue::Double(2.5))]
#[case::string(Value::from("abc"), PropertyValue::String("abc".to_string()))]
fn given_scalar_when_value_then_returned_unchanged(
    #[case] value: Value,
    #[case] expected: PropertyValue,
) {
    let props = tree(vec![("key", value)]);
    assert_eq!(props.value("key").unwrap(), Some(expected));
}

// ============================================================
// Lists
// ============================================================

#[test]
fn given_integer_list_when_integer_list_then_all_elements_in_order() {
    let props = tree(vec![("key", Value::from(vec![1, 2, 3]))]);

    let list = props.integer_list("key").unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.element(0), Some(&1));
    assert_eq!(list.element(3), None);
    assert_eq!(list.into_vec(), vec![1, 2, 3]);
}

#[test]
fn given_integer_list_when_other_list_accessors_then_list_contained_integer() {
    let path = "key";
    let props = tree(vec![(path, Value::from(vec![1, 2, 3]))]);

    assert_eq!(
        props.double_list(path).unwrap_err(),
        element_mismatch(path, Kind::Double, Kind::Integer)
    );
    assert_eq!(
        props.string_list(path).unwrap_err(),
        element_mismatch(path, Kind::String, Kind::Integer)
    );
    assert_eq!(
        props.properties_list(path).unwrap_err().to_string(),
        "Expected property list of Properties values, but actual is list contained Integer values. Path 'key'"
    );
    assert_eq!(
        props.integer_value(path).unwrap_err(),
        kind_mismatch(path, Kind::Integer, Kind::List)
    );
}

#[test]
fn given_double_and_string_lists_when_matching_accessor_then_succeeds() {
    let props = tree(vec![
        ("doubles", Value::from(vec![1.1, 2.2, 3.3])),
        ("strings", Value::from(vec!["a", "b", "c"])),
    ]);

    assert_eq!(
        props.double_list("doubles").unwrap().as_slice(),
        &[1.1, 2.2, 3.3]
    );
    assert_eq!(
        props.string_list("strings").unwrap().into_vec(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert_eq!(
        props.integer_list("strings").unwrap_err(),
        element_mismatch("strings", Kind::Integer, Kind::String)
    );
}

#[test]
fn given_properties_list_when_properties_list_then_elements_are_trees() {
    let props = tree(vec![(
        "root",
        Value::List(vec![
            map(vec![("key1", Value::from(1))]),
            map(vec![("key2", Value::from(2))]),
            map(vec![("key3", Value::from(3))]),
        ]),
    )]);

    let list = props.properties_list("root").unwrap();
    assert_eq!(list[0].integer_value("key1").unwrap(), 1);
    assert_eq!(list[1].integer_value("key2").unwrap(), 2);
    assert_eq!(list[2].integer_value("key3").unwrap(), 3);
    assert_eq!(
        props.integer_list("root").unwrap_err(),
        element_mismatch("root", Kind::Integer, Kind::Properties)
    );
}

#[test]
fn given_mixed_list_when_typed_list_then_first_offending_element_reported() {
    let props = tree(vec![(
        "key",
        Value::List(vec![Value::from(1), Value::from(2.0), Value::from("x")]),
    )]);

    assert_eq!(
        props.integer_list("key").unwrap_err(),
        element_mismatch("key", Kind::Integer, Kind::Double)
    );
    assert_eq!(
        props.string_list("key").unwrap_err(),
        element_mismatch("key", Kind::String, Kind::Integer)
    );
}

#[test]
fn given_mixed_list_when_value_then_first_element_decides_expected_kind() {
    let props = tree(vec![(
        "key",
        Value::List(vec![Value::from("a"), Value::from(1)]),
    )]);

    assert_eq!(
        props.value("key").unwrap_err(),
        element_mismatch("key", Kind::String, Kind::Integer)
    );
}

#[rstest]
#[case::integers(Value::from(vec![1, 2]), Kind::Integer)]
#[case::doubles(Value::from(vec![1.5, 2.5]), Kind::Double)]
#[case::strings(Value::from(vec!["a", "b"]), Kind::String)]
#[case::trees(Value::List(vec![map(vec![]), map(vec![])]), Kind::Properties)]
fn given_homogeneous_list_when_value_then_typed_by_first_element(
    #[case] value: Value,
    #[case] element: Kind,
) {
    let props = tree(vec![("key", value)]);

    let resolved = props.value("key").unwrap().unwrap();
    assert_eq!(resolved.kind(), Kind::List);
    let inferred = match resolved {
        PropertyValue::IntegerList(l) if l.len() == 2 => Kind::Integer,
        PropertyValue::DoubleList(l) if l.len() == 2 => Kind::Double,
        PropertyValue::StringList(l) if l.len() == 2 => Kind::String,
        PropertyValue::PropertiesList(l) if l.len() == 2 => Kind::Properties,
        other => panic!("unexpected list {other:?}"),
    };
    assert_eq!(inferred, element);
}

#[test]
fn given_empty_list_when_value_then_unsupported_shape() {
    let props = tree(vec![("key", Value::List(vec![]))]);

    assert!(matches!(
        props.value("key"),
        Err(PropertyError::UnsupportedShape { ref path, .. }) if path == "key"
    ));
    // Typed accessors know the element kind, so an empty list is fine there
    assert!(props.integer_list("key").unwrap().is_empty());
}

#[test]
fn given_list_of_lists_when_value_then_unsupported_shape() {
    let props = tree(vec![(
        "key",
        Value::List(vec![Value::from(vec![1]), Value::from(vec![2])]),
    )]);
    assert!(matches!(
        props.value("key"),
        Err(PropertyError::UnsupportedShape { .. })
    ));
}

// ============================================================
// Dotted traversal
// ============================================================

#[test]
fn given_three_level_tree_when_dotted_paths_then_resolves_or_fails_precisely() {
    let props = tree(vec![(
        "a",
        map(vec![("b", map(vec![("c", Value::from(123))]))]),
    )]);

    assert_eq!(props.integer_value("a.b.c").unwrap(), 123);
    assert_eq!(
        props.integer_value("a.b").unwrap_err(),
        kind_mismatch("a.b", Kind::Integer, Kind::Properties)
    );
    assert_eq!(
        props.integer_value("a.x").unwrap_err(),
        PropertyError::NotFound {
            path: "a.x".to_string()
        }
    );
    assert_eq!(props.value("a.b.c.d").unwrap(), None);
    assert_eq!(props.properties_value("a").unwrap().integer_value("b.c").unwrap(), 123);
}

#[test]
fn given_nested_tree_when_size_then_counts_only_own_entries() {
    let props = tree(vec![
        ("a", map(vec![("x", Value::from(1)), ("y", Value::from(2))])),
        ("b", Value::from("s")),
    ]);

    assert_eq!(props.size(), 2);
    assert_eq!(props.properties_value("a").unwrap().size(), 2);
    assert!(props.as_map().contains_key("b"));
}

#[test]
fn given_paths_when_contains_then_reports_presence_of_any_kind() {
    let props = tree(vec![
        ("a", map(vec![("b", Value::List(vec![]))])),
        ("s", Value::from("x")),
    ]);

    assert!(props.contains(""));
    assert!(props.contains("a"));
    assert!(props.contains("a.b"));
    assert!(props.contains("s"));
    assert!(!props.contains("a.c"));
    assert!(!props.contains("s.t"));
}

#[test]
fn given_shared_tree_when_read_from_threads_then_same_answers() {
    let props = tree(vec![("a", map(vec![("b", Value::from(5))]))]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let props = props.clone();
            thread::spawn(move || props.integer_value("a.b").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
}
