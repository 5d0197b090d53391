use std::collections::BTreeSet;

use epi_core::{Label, RngHandle};
use epi_engine::{ContagionParams, Evolution, Trace};
use epi_graph::{Graph, Template};
use proptest::prelude::*;

fn check_partition(graph: &Graph, trace: &Trace) {
    let nodes: BTreeSet<Label> = graph.labels().iter().cloned().collect();
    for record in trace.rounds() {
        assert!(record.infectious.is_disjoint(&record.recovered));
        assert!(record.infectious.is_subset(&nodes));
        assert!(record.recovered.is_subset(&nodes));
    }
}

fn seeds(graph: &Graph, mask: u64) -> Vec<Label> {
    graph
        .labels()
        .iter()
        .enumerate()
        .filter(|(idx, _)| mask & (1u64 << (idx % 64)) != 0)
        .map(|(_, label)| label.clone())
        .collect()
}

proptest! {
    #[test]
    fn permanent_recovery_runs_terminate(
        graph_seed in any::<u64>(),
        run_seed in any::<u64>(),
        nodes in 1usize..40,
        density in 0.0f64..0.5,
        probability in 0.0f64..=1.0,
        infection in 1u32..4,
        mask in any::<u64>(),
    ) {
        let graph = Template::ErdosRenyi { nodes, probability: density }
            .build(&mut RngHandle::from_seed(graph_seed))
            .unwrap();
        let params = ContagionParams::new(probability, infection, None).unwrap();
        let mut evolution =
            Evolution::new(&graph, seeds(&graph, mask), params, RngHandle::from_seed(run_seed))
                .unwrap();
        let outcome = evolution.run_bounded(None).unwrap();
        let trace = evolution.trace();
        prop_assert!(!outcome.truncated);
        prop_assert_eq!(trace.len(), outcome.rounds + 1);
        prop_assert!(trace.last().unwrap().infectious.is_empty());
        // each node is infectious for at most one window of `infection` rounds
        prop_assert!(outcome.rounds <= nodes * infection as usize);
        check_partition(&graph, trace);
    }

    #[test]
    fn finite_immunity_keeps_partition(
        run_seed in any::<u64>(),
        nodes in 3usize..30,
        probability in 0.0f64..0.9,
        infection in 1u32..3,
        recovery in 1u32..4,
    ) {
        let graph = Template::CycleMatching { nodes: nodes * 2 }
            .build(&mut RngHandle::from_seed(run_seed))
            .unwrap();
        let params = ContagionParams::new(probability, infection, Some(recovery)).unwrap();
        let mut evolution =
            Evolution::new(&graph, [Label::Int(0)], params, RngHandle::from_seed(run_seed))
                .unwrap();
        let outcome = evolution.run_bounded(Some(200)).unwrap();
        prop_assert_eq!(evolution.trace().len(), outcome.rounds + 1);
        check_partition(&graph, evolution.trace());
    }
}
