//! 过期存储性能基准测试

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tinylink::services::LinkService;
use tinylink::store::{ExpiringStore, MemoryStore, MokaStore};

const TARGET: &str = "https://example.com/very/long/path/to/destination";

fn backends() -> Vec<(&'static str, Arc<dyn ExpiringStore>)> {
    let ttl = Duration::from_secs(3600);
    vec![
        ("moka", Arc::new(MokaStore::new(ttl, 1_000_000))),
        ("memory", Arc::new(MemoryStore::new(ttl, 1_000_000, None))),
    ]
}

// ============== Store 基准测试 ==============

fn bench_get_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    for (name, store) in backends() {
        // 预填充数据
        rt.block_on(async {
            for i in 0..1000 {
                store
                    .set(&format!("key_{}", i), TARGET.to_string())
                    .await
                    .unwrap();
            }
        });

        c.bench_function(&format!("{}/get_hit", name), |b| {
            b.to_async(&rt).iter(|| {
                let s = Arc::clone(&store);
                async move {
                    assert!(s.get("key_500").await.is_some());
                }
            });
        });
    }
}

fn bench_get_miss(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    for (name, store) in backends() {
        c.bench_function(&format!("{}/get_miss", name), |b| {
            b.to_async(&rt).iter(|| {
                let s = Arc::clone(&store);
                async move {
                    assert!(s.get("nonexistent_key").await.is_none());
                }
            });
        });
    }
}

fn bench_insert_if_absent(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    for (name, store) in backends() {
        let counter = AtomicU64::new(0);
        c.bench_function(&format!("{}/insert_if_absent", name), |b| {
            b.to_async(&rt).iter(|| {
                let s = Arc::clone(&store);
                let i = counter.fetch_add(1, Ordering::Relaxed);
                async move {
                    let _ = s
                        .insert_if_absent(&format!("insert_key_{}", i), TARGET.to_string())
                        .await;
                }
            });
        });
    }
}

fn bench_link_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    for (name, store) in backends() {
        let service = Arc::new(LinkService::new(store));
        c.bench_function(&format!("{}/link_create", name), |b| {
            b.to_async(&rt).iter(|| {
                let svc = Arc::clone(&service);
                async move {
                    svc.create(TARGET).await.unwrap();
                }
            });
        });
    }
}

fn bench_concurrent_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    for (name, store) in backends() {
        rt.block_on(async {
            for i in 0..1000 {
                store
                    .set(&format!("concurrent_key_{}", i), TARGET.to_string())
                    .await
                    .unwrap();
            }
        });

        let mut group = c.benchmark_group(format!("{}/concurrent_get", name));
        for num_tasks in [2usize, 4, 8] {
            group.throughput(Throughput::Elements(1000));
            group.bench_with_input(
                BenchmarkId::new("tasks", num_tasks),
                &num_tasks,
                |b, &num_tasks| {
                    b.to_async(&rt).iter(|| {
                        let store = Arc::clone(&store);
                        async move {
                            let mut handles = vec![];
                            for t in 0..num_tasks {
                                let s = Arc::clone(&store);
                                handles.push(tokio::spawn(async move {
                                    for i in 0..(1000 / num_tasks) {
                                        let key = format!(
                                            "concurrent_key_{}",
                                            t * (1000 / num_tasks) + i
                                        );
                                        let _ = s.get(&key).await;
                                    }
                                }));
                            }

                            for handle in handles {
                                handle.await.unwrap();
                            }
                        }
                    });
                },
            );
        }
        group.finish();
    }
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_get_miss,
    bench_insert_if_absent,
    bench_link_create,
    bench_concurrent_get,
);
criterion_main!(benches);
