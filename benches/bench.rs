use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use treeprint::{PrintConfig, Style, Tree};

fn example_tree() -> Tree<&'static str> {
    let mut tree = Tree::new();
    let mut root = tree.root_mut();
    root.append_leaf("Alfa");
    {
        let mut bravo = root.append_branch("Bravo");
        bravo.append_leaf("Charlie");
        bravo
            .append_branch("Delta")
            .append_leaf("Echo")
            .append_leaf("Foxtrot");
        bravo.append_leaf("Golf");
    }
    root.append_leaf("Hotel");
    root.append_branch("India")
        .append_leaf("Juliett")
        .append_leaf("Kilo")
        .append_leaf("Lima")
        .append_leaf("Mike")
        .append_leaf("November");
    root.append_leaf_with_meta("multi", "Oscar\nPapa\nQuebec");
    {
        let mut romeo = root.append_branch("Romeo");
        romeo.append_leaf("Sierra").append_leaf("Tango");
        romeo
            .append_branch("Uniform")
            .append_leaf("Victor")
            .append_leaf("Whiskey\nXray");
        romeo.append_leaf("Yankee");
    }
    root.append_leaf("Zulu");
    tree
}

/// Every node has `width` children until `depth` is reached.
fn wide_tree(width: usize, depth: usize) -> Tree<String> {
    fn fill(node: &mut treeprint::NodeMut<'_, String>, width: usize, depth: usize) {
        for index in 0..width {
            let mut child = node.append_branch(format!("{depth}-{index}\nsecond line"));
            if depth > 1 {
                fill(&mut child, width, depth - 1);
            }
        }
    }

    let mut tree = Tree::new();
    fill(&mut tree.root_mut(), width, depth);
    tree
}

fn init(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("init");
    group.throughput(Throughput::Elements(1));

    group.bench_function("empty", |bencher| {
        bencher.iter(|| black_box(Tree::<&str>::new()));
    });

    group.bench_function("example", |bencher| {
        bencher.iter(|| black_box(example_tree()));
    });

    group.bench_function("wide", |bencher| {
        bencher.iter(|| black_box(wide_tree(black_box(6), black_box(4))));
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1));

    let config = PrintConfig::new().style(Style::new());

    let tree = Tree::<&str>::new();
    group.bench_function("empty", |bencher| {
        bencher.iter(|| black_box(black_box(&tree).render(&config)));
    });

    let tree = example_tree();
    group.bench_function("example", |bencher| {
        bencher.iter(|| black_box(black_box(&tree).render(&config)));
    });

    let tree = wide_tree(6, 4);
    let config = PrintConfig::new().style(Style::new());
    group.bench_function("wide", |bencher| {
        bencher.iter(|| black_box(black_box(&tree).render(&config)));
    });

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = init, renders
}
criterion_main!(benches);
