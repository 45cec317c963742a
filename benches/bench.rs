#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};

use array_list::ArrayList;

static SIZES: [usize; 4] = [16, 256, 4096, 65536];

fn add(c: &mut Criterion) {
    let mut g = c.benchmark_group("add");
    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("ArrayList", n), &n, |b, n| b.iter(|| {
            let mut list = ArrayList::new();
            for i in 0..*n {
                list.add(i);
            }
            std::hint::black_box(list);
        }));
        g.bench_with_input(BenchmarkId::new("Vec", n), &n, |b, n| b.iter(|| {
            let mut v = Vec::with_capacity(4);
            for i in 0..*n {
                v.push(i);
            }
            std::hint::black_box(v);
        }));
    }
    g.finish();
}

fn remove_front(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove_front");
    for n in &SIZES[..3] {
        g.bench_with_input(BenchmarkId::new("ArrayList", n), n, |b, n| b.iter(|| {
            let mut list: ArrayList<usize> = (0..*n).collect();
            while list.remove_at(0) {}
            std::hint::black_box(list);
        }));
    }
    g.finish();
}

fn index_of(c: &mut Criterion) {
    let mut g = c.benchmark_group("index_of");
    for n in SIZES {
        let list: ArrayList<usize> = (0..n).collect();
        g.bench_with_input(BenchmarkId::new("last", n), &n, |b, n| b.iter(|| {
            std::hint::black_box(list.index_of(&(n - 1)));
        }));
        g.bench_with_input(BenchmarkId::new("missing", n), &n, |b, n| b.iter(|| {
            std::hint::black_box(list.index_of(n));
        }));
    }
    g.finish();
}

fn traverse(c: &mut Criterion) {
    let list: ArrayList<u64> = (0..4096).collect();
    c.bench_function("cursor", |b| b.iter(|| {
        let mut sum = 0u64;
        let mut cursor = list.cursor();
        while cursor.advance() {
            sum += cursor.current().copied().unwrap_or(0);
        }
        std::hint::black_box(sum)
    }));
}

criterion_group!(benches, add, remove_front, index_of, traverse);
criterion_main!(benches);
