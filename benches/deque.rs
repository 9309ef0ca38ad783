use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ringdeque::Deque;
use std::collections::VecDeque;

fn bench_deque(c: &mut Criterion) {
    let n = 1024;
    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Push 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                }
                d
            })
        });

        group.bench_function("ringdeque::Deque", |b| {
            b.iter(|| {
                let mut d = Deque::new();
                for i in 0..n {
                    d.push(black_box(i as i32));
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Queue churn 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                    if i % 3 == 0 {
                        black_box(d.pop_front());
                    }
                }
                while let Some(x) = d.pop_front() {
                    black_box(x);
                }
            })
        });

        group.bench_function("ringdeque::Deque", |b| {
            b.iter(|| {
                let mut d = Deque::new();
                for i in 0..n {
                    d.push(black_box(i as i32));
                    if i % 3 == 0 {
                        black_box(d.shift().ok());
                    }
                }
                while let Ok(x) = d.shift() {
                    black_box(x);
                }
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Get 1024)");
        let d_std: VecDeque<i32> = (0..n).collect();
        let d_ring: Deque<i32> = (0..n).collect();

        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                for i in 0..n {
                    black_box(d_std.get(black_box(i as usize)));
                }
            })
        });

        group.bench_function("ringdeque::Deque", |b| {
            b.iter(|| {
                for i in 0..n {
                    black_box(d_ring.get(black_box(i as isize)).ok());
                }
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Rotate 1000 by 7)");
        group.bench_function("std::collections::VecDeque", |b| {
            let mut d: VecDeque<i32> = (0..1000).collect();
            b.iter(|| d.rotate_left(black_box(7)))
        });

        group.bench_function("ringdeque::Deque", |b| {
            let mut d: Deque<i32> = (0..1000).collect();
            b.iter(|| d.rotate(black_box(7)))
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Deque bulk (1024)");
        let d: Deque<i32> = (0..n).rev().collect();
        group.bench_function("map", |b| b.iter(|| d.map(|x| x * 2)));
        group.bench_function("filter_by", |b| b.iter(|| d.filter_by(|x| x % 2 == 0)));
        group.bench_function("sort", |b| {
            b.iter(|| {
                let mut sorted = d.clone();
                sorted.sort();
                sorted
            })
        });
        group.bench_function("join", |b| b.iter(|| d.join(",")));
        group.finish();
    }
}

criterion_group!(benches, bench_deque);
criterion_main!(benches);
