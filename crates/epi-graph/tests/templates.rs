use epi_core::errors::EpiError;
use epi_core::rng::RngHandle;
use epi_core::Label;
use epi_graph::{to_adjlist, Template};
use proptest::prelude::*;

#[test]
fn cycle_shapes() {
    let mut rng = RngHandle::from_seed(1);
    let four = Template::Cycle { nodes: 4 }.build(&mut rng).unwrap();
    assert_eq!(four.edge_count(), 4);
    assert_eq!(to_adjlist(&four), "0 1 3\n1 2\n2 3\n3\n");
    assert_eq!(Template::Cycle { nodes: 2 }.build(&mut rng).unwrap().edge_count(), 1);
    assert_eq!(Template::Cycle { nodes: 1 }.build(&mut rng).unwrap().edge_count(), 0);
    assert!(Template::Cycle { nodes: 0 }.build(&mut rng).unwrap().is_empty());
}

#[test]
fn torus_nodes_have_four_neighbors() {
    let mut rng = RngHandle::from_seed(1);
    let graph = Template::Torus { columns: 4, rows: 3 }.build(&mut rng).unwrap();
    assert_eq!(graph.node_count(), 12);
    assert_eq!(graph.edge_count(), 24);
    assert!((0..12).all(|idx| graph.degree(idx) == 4));
    assert!(graph.is_connected());
}

#[test]
fn narrow_torus_does_not_wrap_short_axes() {
    let mut rng = RngHandle::from_seed(1);
    let graph = Template::Torus { columns: 2, rows: 3 }.build(&mut rng).unwrap();
    assert_eq!(graph.edge_count(), 3 + 2 * 3);
}

#[test]
fn matching_pairs_every_node() {
    let mut rng = RngHandle::from_seed(77);
    let graph = Template::Matching { nodes: 10 }.build(&mut rng).unwrap();
    assert_eq!(graph.edge_count(), 5);
    assert!((0..10).all(|idx| graph.degree(idx) == 1));
}

#[test]
fn erdos_renyi_extremes() {
    let mut rng = RngHandle::from_seed(3);
    let empty = Template::ErdosRenyi { nodes: 6, probability: 0.0 }
        .build(&mut rng)
        .unwrap();
    assert_eq!(empty.edge_count(), 0);
    let complete = Template::ErdosRenyi { nodes: 6, probability: 1.0 }
        .build(&mut rng)
        .unwrap();
    assert_eq!(complete.edge_count(), 15);
}

#[test]
fn odd_matching_is_rejected() {
    let mut rng = RngHandle::from_seed(3);
    let err = Template::TorusMatching { columns: 3, rows: 3 }
        .build(&mut rng)
        .unwrap_err();
    match err {
        EpiError::Graph(info) => {
            assert_eq!(info.code, "invalid-template");
            assert_eq!(info.context.get("template"), Some(&"TORUS_U_MATCHING".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(Template::ErdosRenyi { nodes: 3, probability: 1.5 }.validate().is_err());
}

#[test]
fn union_keeps_first_graph_order() {
    let mut rng = RngHandle::from_seed(5);
    let graph = Template::CycleMatching { nodes: 8 }.build(&mut rng).unwrap();
    let expected: Vec<Label> = (0..8usize).map(Label::from).collect();
    assert_eq!(graph.labels(), expected.as_slice());
    assert!(graph.edge_count() >= 8 && graph.edge_count() <= 12);
}

proptest! {
    #[test]
    fn same_seed_same_graph(seed in any::<u64>(), nodes in 2usize..20) {
        let template = Template::CycleErdosRenyi { nodes, probability: 0.3 };
        let a = template.build(&mut RngHandle::from_seed(seed)).unwrap();
        let b = template.build(&mut RngHandle::from_seed(seed)).unwrap();
        prop_assert_eq!(to_adjlist(&a), to_adjlist(&b));
        prop_assert!(a.is_connected());
    }
}
