use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use duyin_core::{LabelEngine, Strategy};

const CORPUS: &[&str] = &[
    "银行", "银河", "行走", "行列", "行业", "长城", "长江", "长大", "重庆", "重要", "音乐", "快乐",
    "火车", "汽车", "学生", "生活", "天气", "大学", "大夫", "中国", "中文", "人民", "朋友", "时间",
    "电话", "电脑", "地方", "东西", "银", "河", "天", "马", "书", "水", "iPhone", "A梦",
];

fn bench_run(c: &mut Criterion) {
    let engine = LabelEngine::with_pinyin().expect("pinyin dictionary");
    let mut group = c.benchmark_group("assign/run");
    for strategy in [Strategy::FirstChar, Strategy::Union] {
        group.bench_with_input(
            BenchmarkId::new(strategy.name(), CORPUS.len()),
            &strategy,
            |b, &strategy| {
                b.iter(|| engine.run(CORPUS, strategy).expect("run"));
            },
        );
    }
    group.finish();
}

fn bench_run_pair(c: &mut Criterion) {
    let engine = LabelEngine::with_pinyin().expect("pinyin dictionary");
    c.bench_function("assign/run_pair", |b| {
        b.iter(|| {
            engine
                .run_pair(CORPUS, Strategy::FirstChar, Strategy::Union)
                .expect("run pair")
        });
    });
}

criterion_group!(benches, bench_run, bench_run_pair);
criterion_main!(benches);
