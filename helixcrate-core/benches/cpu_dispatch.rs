use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use helixcrate_core::{CpuDispatcher, HelixParams, HelixVertex};

const STEP_COUNTS: [u32; 4] = [320, 4_096, 65_536, 1_048_576];

fn cpu_dispatch(c: &mut Criterion) {
    let mut g = c.benchmark_group("cpu dispatch");
    g.sample_size(20);

    for steps in STEP_COUNTS {
        let params = HelixParams::default().with_steps(steps);
        let mut out = vec![HelixVertex::default(); params.vertex_count()];

        for (name, dispatcher) in [("parallel", CpuDispatcher::new()), ("sequential", CpuDispatcher::new().sequential())] {
            let workgroups = dispatcher.workgroups_for(&params);
            g.bench_with_input(BenchmarkId::new(name, steps), &params, |b, params| {
                b.iter(|| dispatcher.dispatch(std::hint::black_box(params), &mut out, workgroups).unwrap());
            });
        }
    }

    g.finish();
}

criterion_group!(benches, cpu_dispatch);
criterion_main!(benches);
