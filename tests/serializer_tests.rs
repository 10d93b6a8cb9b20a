// tests/serializer_tests.rs
use fieldquill::document::{Field, FieldPatch, FieldPath, FieldTree, PlacedField};
use fieldquill::serializer::{render_document, render_fields, RenderOptions};

fn nested_tree() -> FieldTree {
    FieldTree::from_fields(vec![
        Field::string("x1", Some("name"), "hi"),
        Field::array("x2", Some("items"), vec![Field::number("x3", None, 5.0)]),
    ])
}

#[test]
fn test_nesting_scenario_fragment() {
    let text = render_fields(nested_tree().get_fields(), "  ", 1);
    assert_eq!(text, "  \"name\":\"hi\",\n  \"items\":[\n    5\n  ]");
}

#[test]
fn test_rendering_is_deterministic() {
    let tree = nested_tree();
    let options = RenderOptions::default();
    assert_eq!(render_document(&tree, &options), render_document(&tree, &options));
    assert_eq!(
        render_document(&tree, &options),
        render_document(&tree.clone(), &options)
    );
}

#[test]
fn test_comma_on_every_sibling_but_last() {
    let tree = FieldTree::from_fields(vec![
        Field::number("a", Some("a"), 1.0),
        Field::number("b", Some("b"), 2.0),
        Field::object(
            "c",
            Some("c"),
            vec![
                Field::boolean("d", Some("d"), true),
                Field::boolean("e", Some("e"), false),
            ],
        ),
    ]);
    let text = render_fields(tree.get_fields(), "  ", 0);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"a\":1,",
            "\"b\":2,",
            "\"c\":{",
            "  \"d\":true,",
            "  \"e\":false",
            "}",
        ]
    );
}

#[test]
fn test_comment_follows_comma() {
    let tree = FieldTree::from_fields(vec![
        Field::number("a", Some("port"), 8080.0).with_comment("note"),
        Field::number("b", Some("limit"), 1.0).with_comment("last one"),
    ]);
    let text = render_fields(tree.get_fields(), "  ", 1);
    assert_eq!(
        text,
        "  \"port\":8080,  // note\n  \"limit\":1  // last one"
    );
}

#[test]
fn test_comment_on_container_goes_after_closing_bracket() {
    let tree = FieldTree::from_fields(vec![Field::array(
        "a",
        Some("list"),
        vec![Field::string("b", None, "x")],
    )
    .with_comment("values")]);
    let text = render_fields(tree.get_fields(), "  ", 0);
    assert_eq!(text, "\"list\":[\n  \"x\"\n]  // values");
}

#[test]
fn test_multiline_comment_stays_on_one_line() {
    let tree = FieldTree::from_fields(vec![
        Field::boolean("a", Some("on"), true).with_comment("first\nsecond\r\nthird"),
    ]);
    let text = render_fields(tree.get_fields(), "", 0);
    assert_eq!(text, "\"on\":true  // first second third");
}

#[test]
fn test_every_line_terminator_is_folded_in_comments() {
    let tree = FieldTree::from_fields(vec![
        Field::number("a", Some("a"), 1.0).with_comment("one\rtwo"),
        Field::number("b", Some("b"), 2.0).with_comment("x\u{2028}y\u{2029}z"),
    ]);
    let text = render_document(&tree, &RenderOptions::default());
    assert_eq!(text, "{\n  \"a\":1,  // one two\n  \"b\":2  // x y z\n}");
    assert!(!text.contains(['\r', '\u{2028}', '\u{2029}']));
    assert_eq!(text.split('\n').count(), 4);
}

#[test]
fn test_line_separators_in_strings_are_escaped() {
    let tree = FieldTree::from_fields(vec![Field::string(
        "a",
        Some("k\u{2028}"),
        "v\u{2029}",
    )]);
    assert_eq!(
        render_fields(tree.get_fields(), "", 0),
        "\"k\\u2028\":\"v\\u2029\""
    );
}

#[test]
fn test_wrapped_document() {
    let text = render_document(&nested_tree(), &RenderOptions::default());
    assert_eq!(text, "{\n  \"name\":\"hi\",\n  \"items\":[\n    5\n  ]\n}");
}

#[test]
fn test_unwrapped_document_with_wide_indent() {
    let options = RenderOptions {
        indent_size: 4,
        wrap_document: false,
    };
    let text = render_document(&nested_tree(), &options);
    assert_eq!(text, "\"name\":\"hi\",\n\"items\":[\n    5\n]");
}

#[test]
fn test_empty_document_and_containers() {
    assert_eq!(
        render_document(&FieldTree::new(), &RenderOptions::default()),
        "{}"
    );

    let tree = FieldTree::from_fields(vec![
        Field::array("a", Some("list"), vec![]),
        Field::object("b", Some("map"), vec![]),
    ]);
    assert_eq!(
        render_fields(tree.get_fields(), "  ", 0),
        "\"list\":[],\n\"map\":{}"
    );
}

#[test]
fn test_keys_and_strings_are_escaped() {
    let tree = FieldTree::from_fields(vec![Field::string(
        "a",
        Some("say \"hi\""),
        "line\nbreak\\",
    )]);
    assert_eq!(
        render_fields(tree.get_fields(), "", 0),
        "\"say \\\"hi\\\"\":\"line\\nbreak\\\\\""
    );
}

#[test]
fn test_numbers() {
    let tree = FieldTree::from_fields(vec![
        Field::number("a", None, 3.0),
        Field::number("b", None, -0.25),
        Field::number("c", None, f64::NAN),
        Field::number("d", None, f64::NEG_INFINITY),
    ]);
    assert_eq!(
        render_fields(tree.get_fields(), "", 0),
        "3,\n-0.25,\nNaN,\n-Infinity"
    );
}

#[test]
fn test_rendering_follows_edits() {
    let tree = nested_tree()
        .update(&FieldPath::from(["x2", "x3"]), &FieldPatch::new().value(6))
        .unwrap()
        .create(PlacedField::new(
            FieldPath::from(["x2"]),
            Field::string("x4", None, "six"),
        ))
        .unwrap();
    let text = render_fields(tree.get_fields(), "  ", 1);
    assert_eq!(
        text,
        "  \"name\":\"hi\",\n  \"items\":[\n    6,\n    \"six\"\n  ]"
    );
}
