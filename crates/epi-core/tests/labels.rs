use epi_core::{Label, NodeState};

#[test]
fn integers_sort_before_text() {
    let mut labels = vec![Label::from("b"), Label::Int(10), Label::from("a"), Label::Int(-2)];
    labels.sort();
    assert_eq!(
        labels,
        vec![Label::Int(-2), Label::Int(10), Label::from("a"), Label::from("b")]
    );
}

#[test]
fn labels_serialize_untagged() {
    let labels = vec![Label::Int(3), Label::from("x")];
    let json = serde_json::to_string(&labels).unwrap();
    assert_eq!(json, r#"[3,"x"]"#);
    let back: Vec<Label> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, labels);
}

#[test]
fn parse_int_rejects_text() {
    assert_eq!(Label::parse_int("42"), Some(Label::Int(42)));
    assert_eq!(Label::parse_int("4x"), None);
    assert_eq!(Label::Int(42).to_string(), "42");
}

#[test]
fn node_state_names() {
    assert_eq!(
        serde_json::to_string(&NodeState::Recovered).unwrap(),
        "\"recovered\""
    );
}
