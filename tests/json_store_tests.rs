use fieldquill::value::path::{parse_value_path, PathSegment, ValuePathError};
use fieldquill::value::store::{JsonStore, MAX_INDEX_GAP};
use serde_json::json;

#[test]
fn test_add_key_builds_nested_objects() {
    let mut store = JsonStore::new();
    store.add_key("a.b.c", json!(1)).unwrap();
    assert_eq!(store.json(), &json!({"a": {"b": {"c": 1}}}));
}

#[test]
fn test_add_key_builds_arrays_for_indices() {
    let mut store = JsonStore::new();
    store.add_key("list[2].name", json!("x")).unwrap();
    assert_eq!(store.json(), &json!({"list": [null, null, {"name": "x"}]}));
}

#[test]
fn test_update_value_overwrites() {
    let mut store = JsonStore::from_value(json!({"a": {"b": 1}}));
    store.update_value("a.b", json!([true])).unwrap();
    assert_eq!(store.get_value("a.b[0]").unwrap(), Some(&json!(true)));
}

#[test]
fn test_remove_key_from_object_and_array() {
    let mut store = JsonStore::from_value(json!({"a": [1, 2, 3], "b": 4}));
    assert_eq!(store.remove_key("a[0]").unwrap(), Some(json!(1)));
    assert_eq!(store.remove_key("b").unwrap(), Some(json!(4)));
    assert_eq!(store.into_value(), json!({"a": [2, 3]}));
}

#[test]
fn test_update_key_renames_in_place_of_old() {
    let mut store = JsonStore::from_value(json!({"a": {"old": 1}}));
    store.update_key("a.old", "a.new", json!(2)).unwrap();
    assert_eq!(store.json(), &json!({"a": {"new": 2}}));
}

#[test]
fn test_bad_path_changes_nothing() {
    let mut store = JsonStore::from_value(json!({"a": 1}));
    assert!(store.add_key("a..b", json!(1)).is_err());
    assert!(store.update_key("a", "b[x]", json!(1)).is_err());
    assert_eq!(store.json(), &json!({"a": 1}));
}

#[test]
fn test_parse_mixed_path() {
    assert_eq!(
        parse_value_path("users[0]['first name'].tags.1").unwrap(),
        vec![
            PathSegment::Key("users".to_string()),
            PathSegment::Index(0),
            PathSegment::Key("first name".to_string()),
            PathSegment::Key("tags".to_string()),
            PathSegment::Index(1),
        ]
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_value_path(""), Err(ValuePathError::Empty));
    assert!(matches!(
        parse_value_path("a..b"),
        Err(ValuePathError::EmptySegment { position: 2 })
    ));
    assert!(matches!(
        parse_value_path("a['b"),
        Err(ValuePathError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_index_at_usize_max_is_rejected() {
    let mut store = JsonStore::new();
    assert_eq!(
        store.add_key("a[18446744073709551615]", json!(1)),
        Err(ValuePathError::IndexTooLarge {
            index: usize::MAX,
            len: 0,
        })
    );
    assert_eq!(store.json(), &json!({}));
}

#[test]
fn test_index_far_past_end_is_rejected() {
    let mut store = JsonStore::from_value(json!({"a": [1, 2]}));
    assert!(matches!(
        store.add_key("a[100000000000]", json!(1)),
        Err(ValuePathError::IndexTooLarge { len: 2, .. })
    ));
    assert!(matches!(
        store.update_value("a.100000000000.b", json!(1)),
        Err(ValuePathError::IndexTooLarge { .. })
    ));
    assert_eq!(store.json(), &json!({"a": [1, 2]}));
}

#[test]
fn test_index_at_gap_limit_is_padded() {
    let mut store = JsonStore::from_value(json!({"a": [1]}));
    let index = 1 + MAX_INDEX_GAP;
    store.add_key(&format!("a[{}]", index), json!(true)).unwrap();

    let items = store.get_value("a").unwrap().unwrap().as_array().unwrap();
    let len = items.len();
    assert_eq!(len, index + 1);
    assert_eq!(items[index], json!(true));
    assert_eq!(items[1], json!(null));

    assert!(store
        .add_key(&format!("a[{}]", len + MAX_INDEX_GAP + 1), json!(1))
        .is_err());
}
