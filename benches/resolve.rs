use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use vaultgroup::settings::Searching;
use vaultgroup::{Group, GroupId, GroupTree, Resolver, TriState};

/// A single chain of `depth` groups below an explicitly disabled root.
fn make_chain(depth: usize) -> (GroupTree, GroupId) {
    let mut root = Group::new("root");
    root.set_searching_enabled(TriState::Disable);
    let mut tree = GroupTree::new(root);

    let mut current = tree.root_id();
    for level in 0..depth {
        current = tree.add_group(current, Group::new(format!("level-{level}"))).unwrap();
    }
    (tree, current)
}

fn bench_resolve_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/inherit_chain");
    for depth in [1usize, 8, 32, 127] {
        let (tree, leaf) = make_chain(depth);
        let resolver = Resolver::default();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                resolver
                    .resolve_effective(black_box(&tree), black_box(leaf), &Searching, true)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve_depth);
criterion_main!(benches);
