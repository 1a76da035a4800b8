use jt_core::{
    InsideEdge, Insertion, Placement, TreeError, TreeOpts, access, all_sibling_ids,
    children_json, descendant_ids, elder_sibling_id, first_child_id, has_children, insert,
    insert_adjacent, insert_into, is_first_child, is_last_child, next_younger_sibling_id,
    parent_id, parse_document, remove_by_id, sibling_element_paths, topmost_ancestor_id,
    younger_sibling_ids,
};

const SIMPLE: &str = r#"{"a":[{"b" : []}]}"#;
const TREE: &str = r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#;
const SMALL: &str = r#"{"a":[{"b":[{"c":[]},{"d":[]}]},{"m":[]}]}"#;
const BRANCH: &str = r#"{"w": [{"y":[]}]}"#;
const IDS: [&str; 14] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
];

fn opts() -> TreeOpts {
    TreeOpts::default()
}

fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn topmost_ancestor() {
    assert_eq!(topmost_ancestor_id(TREE).unwrap(), "a");
    let doc = parse_document(TREE).unwrap();
    let sub = access::get(&doc, "a.0.b.1.d.0", &opts()).unwrap().to_string();
    assert_eq!(topmost_ancestor_id(&sub).unwrap(), "e");
    assert!(topmost_ancestor_id("nope").unwrap_err().is_parse_error());
}

#[test]
fn parent_ids() {
    let o = opts();
    for (id, parent) in [("i", "e"), ("h", "e"), ("f", "e"), ("b", "a"), ("m", "a"), ("a", "")] {
        assert_eq!(parent_id(TREE, id, &o).unwrap(), parent, "parent of {id}");
    }
    assert!(parent_id(TREE, "zzz", &o).unwrap_err().is_not_found());
}

#[test]
fn descendants_in_pre_order() {
    let o = opts();
    assert!(descendant_ids(TREE, "g", false, &o).unwrap().is_empty());
    assert!(descendant_ids(TREE, "n", false, &o).unwrap().is_empty());
    assert_eq!(descendant_ids(TREE, "i", false, &o).unwrap(), strs(&["j", "k", "l"]));
    assert_eq!(
        descendant_ids(TREE, "d", false, &o).unwrap(),
        strs(&["e", "f", "g", "h", "i", "j", "k", "l"])
    );
    assert_eq!(descendant_ids(TREE, "a", false, &o).unwrap(), strs(&IDS[1..]));
    assert_eq!(descendant_ids(TREE, "e", true, &o).unwrap(), strs(&["f", "g", "h", "i"]));
    assert!(descendant_ids(TREE, "zzz", false, &o).unwrap_err().is_not_found());
}

#[test]
fn children_json_returns_raw_array() {
    let o = opts();
    assert_eq!(children_json(SIMPLE, "a", &o).unwrap(), r#"[{"b":[]}]"#);
    assert_eq!(children_json(SIMPLE, "b", &o).unwrap(), "[]");
    assert_eq!(
        children_json(TREE, "e", &o).unwrap(),
        r#"[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]"#
    );
    assert_eq!(children_json(TREE, "l", &o).unwrap(), "[]");
}

#[test]
fn first_child_and_has_children() {
    let o = opts();
    assert_eq!(first_child_id(TREE, "b", &o).unwrap(), "c");
    assert_eq!(first_child_id(TREE, "d", &o).unwrap(), "e");
    assert_eq!(first_child_id(TREE, "e", &o).unwrap(), "f");
    assert!(matches!(
        first_child_id(TREE, "c", &o),
        Err(TreeError::NoChildren { .. })
    ));
    assert!(matches!(
        first_child_id(TREE, "n", &o),
        Err(TreeError::NoChildren { .. })
    ));

    for (id, expected) in [("b", true), ("c", false), ("d", true), ("e", true), ("n", false)] {
        assert_eq!(has_children(TREE, id, &o).unwrap(), expected, "has_children({id})");
    }
}

#[test]
fn first_and_last_child() {
    let o = opts();
    for id in ["a", "b", "f", "j"] {
        assert!(is_first_child(TREE, id, &o).unwrap(), "{id} is first");
    }
    for id in ["i", "m", "n", "l"] {
        assert!(!is_first_child(TREE, id, &o).unwrap(), "{id} is not first");
    }
    for id in ["a", "i", "n", "l"] {
        assert!(is_last_child(TREE, id, &o).unwrap(), "{id} is last");
    }
    for id in ["h", "b", "j", "m"] {
        assert!(!is_last_child(TREE, id, &o).unwrap(), "{id} is not last");
    }
    assert!(is_first_child(TREE, "zzz", &o).unwrap_err().is_not_found());
}

#[test]
fn sibling_slots() {
    let o = opts();
    assert_eq!(
        sibling_element_paths(TREE, "g", &o).unwrap(),
        strs(&["a.0.b.1.d.0.e.0", "a.0.b.1.d.0.e.2", "a.0.b.1.d.0.e.3"])
    );
    assert_eq!(
        sibling_element_paths(TREE, "h", &o).unwrap(),
        strs(&["a.0.b.1.d.0.e.0", "a.0.b.1.d.0.e.1", "a.0.b.1.d.0.e.3"])
    );
    assert_eq!(
        sibling_element_paths(TREE, "l", &o).unwrap(),
        strs(&["a.0.b.1.d.0.e.3.i.0", "a.0.b.1.d.0.e.3.i.1"])
    );
    assert_eq!(sibling_element_paths(TREE, "n", &o).unwrap(), strs(&["a.0", "a.1"]));
    assert!(sibling_element_paths(TREE, "a", &o).unwrap().is_empty());
}

#[test]
fn sibling_ids() {
    let o = opts();
    assert_eq!(all_sibling_ids(TREE, "g", &o).unwrap(), strs(&["f", "h", "i"]));
    assert_eq!(all_sibling_ids(TREE, "b", &o).unwrap(), strs(&["m", "n"]));
    assert_eq!(all_sibling_ids(TREE, "l", &o).unwrap(), strs(&["j", "k"]));
    assert_eq!(all_sibling_ids(TREE, "c", &o).unwrap(), strs(&["d"]));
    assert!(all_sibling_ids(TREE, "a", &o).unwrap().is_empty());

    assert_eq!(younger_sibling_ids(TREE, "g", &o).unwrap(), strs(&["h", "i"]));
    assert_eq!(younger_sibling_ids(TREE, "f", &o).unwrap(), strs(&["g", "h", "i"]));
    assert_eq!(younger_sibling_ids(TREE, "b", &o).unwrap(), strs(&["m", "n"]));
    assert_eq!(younger_sibling_ids(TREE, "m", &o).unwrap(), strs(&["n"]));
    assert!(younger_sibling_ids(TREE, "n", &o).unwrap().is_empty());
    assert!(younger_sibling_ids(TREE, "a", &o).unwrap().is_empty());
}

#[test]
fn elder_and_next_younger_sibling() {
    let o = opts();
    for (id, elder) in [
        ("b", ""),
        ("j", ""),
        ("m", "b"),
        ("n", "m"),
        ("l", "k"),
        ("a", ""),
        ("g", "f"),
    ] {
        assert_eq!(elder_sibling_id(TREE, id, &o).unwrap(), elder, "elder of {id}");
    }
    for (id, next) in [("g", "h"), ("i", ""), ("a", ""), ("b", "m"), ("m", "n"), ("k", "l")] {
        assert_eq!(next_younger_sibling_id(TREE, id, &o).unwrap(), next, "next after {id}");
    }
}

#[test]
fn small_document_queries() {
    let o = opts();
    assert_eq!(parent_id(SMALL, "c", &o).unwrap(), "b");
    assert_eq!(all_sibling_ids(SMALL, "c", &o).unwrap(), strs(&["d"]));
    assert!(is_first_child(SMALL, "c", &o).unwrap());
    assert!(is_last_child(SMALL, "d", &o).unwrap());
    assert_eq!(topmost_ancestor_id(SMALL).unwrap(), "a");
}

#[test]
fn parent_matches_path_algebra_for_every_node() {
    use jt_core::path::{identifier_of, parent_path, resolve_path};
    let o = opts();
    let doc = parse_document(TREE).unwrap();
    let flat = jt_core::flatten(&doc, &o).unwrap();
    for id in &IDS[1..] {
        let path = resolve_path(&flat, id, &o).unwrap();
        let parent = parent_path(&path, &o).unwrap();
        assert_eq!(identifier_of(parent, &o), parent_id(TREE, id, &o).unwrap());
    }
}

#[test]
fn last_child_iff_no_younger_siblings() {
    let o = opts();
    for id in IDS {
        assert_eq!(
            is_last_child(TREE, id, &o).unwrap(),
            younger_sibling_ids(TREE, id, &o).unwrap().is_empty()
        );
    }
}

#[test]
fn siblings_plus_self_are_parents_children() {
    let o = opts();
    for id in &IDS[1..] {
        let parent = parent_id(TREE, id, &o).unwrap();
        let mut expected = descendant_ids(TREE, &parent, true, &o).unwrap();
        let mut got = all_sibling_ids(TREE, id, &o).unwrap();
        got.push(id.to_string());
        expected.sort();
        got.sort();
        assert_eq!(got, expected, "siblings of {id}");
    }
}

#[test]
fn insert_adjacent_before_and_after() {
    let o = opts();
    assert_eq!(
        insert_adjacent(TREE, "h", BRANCH, Placement::Before, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"w":[{"y":[]}]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_adjacent(TREE, "f", BRANCH, Placement::Before, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"w":[{"y":[]}]},{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_adjacent(TREE, "l", BRANCH, Placement::Before, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"w":[{"y":[]}]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_adjacent(TREE, "l", BRANCH, Placement::After, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]},{"w":[{"y":[]}]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_adjacent(TREE, "b", r#"{"xxx":[]}"#, Placement::After, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"xxx":[]},{"m":[]},{"n":[]}]}"#
    );
}

#[test]
fn insert_adjacent_failures() {
    let o = opts();
    let err = insert_adjacent(TREE, "zzz", BRANCH, Placement::After, &o).unwrap_err();
    assert!(err.kind().is_not_found());
    assert_eq!(err.step, "resolve path");

    let err = insert_adjacent(TREE, "a", BRANCH, Placement::After, &o).unwrap_err();
    assert!(matches!(err.kind(), TreeError::InvalidOperation { .. }));

    let err = insert_adjacent(TREE, "h", r#"{"x":[],"y":[]}"#, Placement::After, &o).unwrap_err();
    assert!(err.kind().is_parse_error());
    assert_eq!(err.payload(), r#"{"error":"jsontree.insert_adjacent - parse branch"}"#);

    let err = insert_adjacent(TREE, "h", "[1]", Placement::After, &o).unwrap_err();
    assert!(err.kind().is_parse_error());
}

#[test]
fn insert_into_node() {
    let o = opts();
    assert_eq!(
        insert_into(TREE, "h", BRANCH, InsideEdge::Beginning, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[{"w":[{"y":[]}]}]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_into(TREE, "h", BRANCH, InsideEdge::End, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[{"w":[{"y":[]}]}]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_into(TREE, "f", BRANCH, InsideEdge::End, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[{"w":[{"y":[]}]}]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_into(TREE, "a", BRANCH, InsideEdge::Beginning, &o).unwrap(),
        r#"{"a":[{"w":[{"y":[]}]},{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_into(TREE, "l", BRANCH, InsideEdge::End, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[{"w":[{"y":[]}]}]}]}]}]}]},{"m":[]},{"n":[]}]}"#
    );
    assert_eq!(
        insert_into(TREE, "b", r#"{"xxx":[]}"#, InsideEdge::End, &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]},{"i":[{"j":[]},{"k":[]},{"l":[]}]}]}]},{"xxx":[]}]},{"m":[]},{"n":[]}]}"#
    );
}

#[test]
fn insert_into_matches_insert_before_first_child() {
    let o = opts();
    assert_eq!(
        insert_into(SMALL, "b", r#"{"w":[]}"#, InsideEdge::Beginning, &o).unwrap(),
        insert_adjacent(SMALL, "c", r#"{"w":[]}"#, Placement::Before, &o).unwrap()
    );
    let out = insert_into(r#"{"a":[]}"#, "a", r#"{"w":[]}"#, InsideEdge::Beginning, &o).unwrap();
    assert_eq!(out, r#"{"a":[{"w":[]}]}"#);
}

#[test]
fn directives_parse() {
    assert_eq!("before".parse::<Placement>().unwrap(), Placement::Before);
    assert_eq!("insideEnd".parse::<InsideEdge>().unwrap(), InsideEdge::End);
    assert_eq!(
        "after".parse::<Insertion>().unwrap(),
        Insertion::Adjacent(Placement::After)
    );
    assert_eq!(
        "insideBeginning".parse::<Insertion>().unwrap(),
        Insertion::Inside(InsideEdge::Beginning)
    );
    for bad in ["insideTop", "Before", ""] {
        assert!(matches!(
            bad.parse::<Insertion>(),
            Err(TreeError::InvalidDirective { .. })
        ));
    }
    assert!(matches!(
        "before".parse::<InsideEdge>(),
        Err(TreeError::InvalidDirective { .. })
    ));
}

#[test]
fn insert_dispatches_directive() {
    let o = opts();
    let via_dispatch = insert(TREE, "k", BRANCH, "after".parse().unwrap(), &o).unwrap();
    let direct = insert_adjacent(TREE, "k", BRANCH, Placement::After, &o).unwrap();
    assert_eq!(via_dispatch, direct);
}

#[test]
fn remove_by_id_cases() {
    let o = opts();
    assert_eq!(remove_by_id(SIMPLE, "b", &o).unwrap(), r#"{"a":[]}"#);
    assert_eq!(remove_by_id(TREE, "b", &o).unwrap(), r#"{"a":[{"m":[]},{"n":[]}]}"#);
    assert_eq!(
        remove_by_id(TREE, "i", &o).unwrap(),
        r#"{"a":[{"b":[{"c":[]},{"d":[{"e":[{"f":[]},{"g":[]},{"h":[]}]}]}]},{"m":[]},{"n":[]}]}"#
    );

    let err = remove_by_id(SMALL, "a", &o).unwrap_err();
    assert!(matches!(err.kind(), TreeError::InvalidOperation { .. }));
    assert_eq!(err.payload(), r#"{"error":"jsontree.remove_by_id - element path"}"#);

    let err = remove_by_id(SMALL, "zzz", &o).unwrap_err();
    assert!(err.kind().is_not_found());
    assert!(err.to_string().starts_with("remove_by_id - resolve path"));
}

#[test]
fn insert_then_remove_restores_document() {
    let o = opts();
    let original = parse_document(TREE).unwrap();
    for id in ["c", "g", "l", "n"] {
        let grown = insert_adjacent(TREE, id, r#"{"x":[]}"#, Placement::After, &o).unwrap();
        assert_eq!(next_younger_sibling_id(&grown, id, &o).unwrap(), "x");
        let back = remove_by_id(&grown, "x", &o).unwrap();
        assert_eq!(parse_document(&back).unwrap(), original);
    }
}

#[test]
fn chained_edits_with_custom_delimiter() {
    let o = TreeOpts::with_delimiter('/');
    let doc = insert_into(SMALL, "m", r#"{"p":[]}"#, InsideEdge::End, &o).unwrap();
    let doc = insert_adjacent(&doc, "p", r#"{"q":[]}"#, Placement::After, &o).unwrap();
    assert_eq!(parent_id(&doc, "q", &o).unwrap(), "m");
    assert_eq!(elder_sibling_id(&doc, "q", &o).unwrap(), "p");
    let doc = remove_by_id(&doc, "p", &o).unwrap();
    assert_eq!(doc, r#"{"a":[{"b":[{"c":[]},{"d":[]}]},{"m":[{"q":[]}]}]}"#);
}
