//! Benchmarks for artifact resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use execflow::artifacts::Artifact;
use execflow::resolver::{
    resolve_all_stage_artifacts, resolve_trigger_artifact_by_name,
    resolve_trigger_artifact_by_type,
};
use execflow::testing::ExecutionFixture;

fn resolver_benchmark(c: &mut Criterion) {
    let execution = (0..64)
        .fold(ExecutionFixture::new("bench"), |fixture, i| {
            fixture
                .bound_artifact(Artifact::new(format!("type-{i}"), format!("artifact-{i}")))
                .stage_with_artifacts(
                    format!("s{i}"),
                    "bake",
                    &[
                        Artifact::new("aws/ami", format!("ami-{i}")),
                        Artifact::new("docker/image", format!("image-{i}")),
                    ],
                )
        })
        .build();

    c.bench_function("trigger_artifact_by_name_last", |b| {
        b.iter(|| resolve_trigger_artifact_by_name(black_box(&execution), black_box("artifact-63")))
    });

    c.bench_function("trigger_artifact_by_type_missing", |b| {
        b.iter(|| resolve_trigger_artifact_by_type(black_box(&execution), black_box("missing")))
    });

    c.bench_function("all_stage_artifacts", |b| {
        b.iter(|| resolve_all_stage_artifacts(black_box(&execution)))
    });
}

criterion_group!(benches, resolver_benchmark);
criterion_main!(benches);
