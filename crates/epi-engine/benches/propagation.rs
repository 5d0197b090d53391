use criterion::{criterion_group, criterion_main, Criterion};
use epi_core::{Label, RngHandle};
use epi_engine::{ContagionParams, Evolution};
use epi_graph::Template;

fn bench_propagation(c: &mut Criterion) {
    let graph = Template::TorusErdosRenyi {
        columns: 32,
        rows: 32,
        probability: 0.002,
    }
    .build(&mut RngHandle::from_seed(7))
    .expect("graph");
    let params = ContagionParams::new(0.3, 2, None).expect("params");
    c.bench_function("torus_1024_sir", |b| {
        b.iter(|| {
            let mut evolution =
                Evolution::new(&graph, [Label::Int(0)], params, RngHandle::from_seed(11))
                    .expect("evolution");
            evolution.run().expect("run").len()
        })
    });
}

criterion_group!(benches, bench_propagation);
criterion_main!(benches);
