use epi_core::errors::EpiError;
use epi_core::Label;
use epi_graph::{parse_adjlist, parse_edgelist, to_adjlist, GraphFormat, NumericPolicy};

#[test]
fn adjacency_list_keeps_first_appearance_order() {
    let graph = parse_adjlist("b a c\na\nc d # trailing comment\n# full comment\n\nd\n").unwrap();
    let labels: Vec<String> = graph.labels().iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["b", "a", "c", "d"]);
    assert_eq!(graph.edge_count(), 3);
    let b = graph.index_of(&Label::from("b")).unwrap();
    assert_eq!(graph.degree(b), 2);
}

#[test]
fn isolated_nodes_survive_adjacency_parsing() {
    let graph = parse_adjlist("0 1\n2\n").unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.degree(2), 0);
}

#[test]
fn edge_list_ignores_data_and_short_lines() {
    let graph = parse_edgelist("0 1 {'weight': 3}\nlonely\n1 2\n2 1\n").unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn self_loops_are_rejected_with_line_number() {
    let err = parse_adjlist("0 1\n1 1\n").unwrap_err();
    match err {
        EpiError::Graph(info) => {
            assert_eq!(info.code, "self-loop");
            assert_eq!(info.context.get("line"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn canonical_rendering_lists_each_edge_once() {
    let graph = parse_adjlist("0 1 3\n1 2\n2 3\n").unwrap();
    assert_eq!(to_adjlist(&graph), "0 1 3\n1 2\n3 2\n2\n");
    let reparsed = parse_adjlist(&to_adjlist(&graph)).unwrap();
    assert_eq!(reparsed.edge_count(), graph.edge_count());
    assert_eq!(to_adjlist(&reparsed), to_adjlist(&graph));
}

#[test]
fn format_dispatch_matches_free_functions() {
    let text = "x y\ny z\n";
    assert_eq!(
        GraphFormat::Edges.parse(text).unwrap(),
        parse_edgelist(text).unwrap()
    );
    assert_eq!("edges".parse::<GraphFormat>().unwrap(), GraphFormat::Edges);
    assert!("matrix".parse::<GraphFormat>().is_err());
}

#[test]
fn auto_policy_is_all_or_none() {
    let numeric = parse_adjlist("0 1\n1 2\n").unwrap();
    let converted = NumericPolicy::Auto.apply(&numeric);
    assert!(converted.labels().iter().all(|l| l.as_int().is_some()));

    let mixed = parse_adjlist("0 1\n1 x\n").unwrap();
    let kept = NumericPolicy::Auto.apply(&mixed);
    assert!(kept.labels().iter().all(|l| l.as_int().is_none()));
}

#[test]
fn always_policy_is_best_effort() {
    let mixed = parse_adjlist("0 1\n1 x\n").unwrap();
    let converted = NumericPolicy::Always.apply(&mixed);
    assert_eq!(
        converted.labels(),
        &[Label::Int(0), Label::Int(1), Label::from("x")]
    );
    assert_eq!(converted.edge_count(), 2);
}

#[test]
fn colliding_integers_block_auto_conversion() {
    let graph = parse_adjlist("7 07\n").unwrap();
    let auto = NumericPolicy::Auto.apply(&graph);
    assert_eq!(auto.labels(), &[Label::from("7"), Label::from("07")]);
    let always = NumericPolicy::Always.apply(&graph);
    assert_eq!(always.labels(), &[Label::Int(7), Label::from("07")]);
}

#[test]
fn tokens_resolve_under_any_policy() {
    let graph = parse_adjlist("0 1\n1 x\n").unwrap();
    let converted = NumericPolicy::Always.apply(&graph);
    assert_eq!(converted.resolve_token("1"), Some(&Label::Int(1)));
    assert_eq!(converted.resolve_token("x"), Some(&Label::from("x")));
    assert_eq!(graph.resolve_token(" 1 "), Some(&Label::from("1")));
    assert_eq!(converted.resolve_token("nope"), None);
    assert_eq!("always".parse::<NumericPolicy>().unwrap(), NumericPolicy::Always);
}
