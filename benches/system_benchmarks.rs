use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use system_presence::{
    format_bytes,
    metrics::{
        data::*,
        sampler::{parse_diskstats, parse_net_dev_drops},
    },
    presence::{presence_variants, DisplayOptions},
    MetricsProvider, MetricsSampler,
};

const GIB: u64 = 1024 * 1024 * 1024;

fn sample_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        timestamp: 1,
        cpu: Some(CpuReading {
            overall_percent: 42.3,
            core_percents: vec![40.0; 16],
            frequency: Some(CpuFrequency {
                current_mhz: 3400.0,
                min_mhz: None,
                max_mhz: None,
            }),
        }),
        memory: Some(MemoryReading {
            total_bytes: 16 * GIB,
            used_bytes: 4 * GIB,
            available_bytes: 12 * GIB,
            percent: 25.0,
            swap: Some(SwapReading {
                total_bytes: 2 * GIB,
                used_bytes: GIB,
                percent: 50.0,
            }),
        }),
        disk_io: Some(DiskIoReading {
            read_bytes: 120 * GIB,
            write_bytes: 80 * GIB,
            ..Default::default()
        }),
        network_io: Some(NetworkIoReading {
            bytes_sent: 3 * GIB,
            bytes_received: 9 * GIB,
            ..Default::default()
        }),
    }
}

/// Benchmark snapshot collection with the shortest CPU window
fn bench_snapshot_collection(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");

    c.bench_function("snapshot_collection", |b| {
        b.to_async(&rt).iter(|| async {
            let mut sampler = MetricsSampler::new().with_cpu_window(Duration::ZERO);
            sampler.collect_snapshot().await
        })
    });
}

/// Benchmark sampler initialization
fn bench_sampler_init(c: &mut Criterion) {
    c.bench_function("sampler_initialization", |b| b.iter(MetricsSampler::new));
}

/// Benchmark byte formatting across unit boundaries
fn bench_format_bytes(c: &mut Criterion) {
    for bytes in [512_u64, 1536 * 1024, 4 * GIB, u64::MAX].iter() {
        c.bench_with_input(BenchmarkId::new("format_bytes", bytes), bytes, |b, &bytes| {
            b.iter(|| format_bytes(bytes))
        });
    }
}

/// Benchmark building the full variant pool
fn bench_presence_variants(c: &mut Criterion) {
    let snapshot = sample_snapshot();
    let display = DisplayOptions::new(true, "Linux");
    let (cpu, memory) = (snapshot.cpu.unwrap(), snapshot.memory.unwrap());

    c.bench_function("presence_variants_full_pool", |b| {
        b.iter(|| {
            presence_variants(
                &cpu,
                &memory,
                snapshot.disk_io.as_ref(),
                snapshot.network_io.as_ref(),
                &display,
            )
        })
    });
}

/// Benchmark /proc text parsing
fn bench_proc_parsing(c: &mut Criterion) {
    let diskstats: String = (0..32)
        .map(|i| format!("   8 {} sd{} 1000 10 20000 300 500 5 8000 700 0 900 1000 0 0 0 0\n", i, i))
        .collect();
    let netdev = format!(
        "header\nheader\n{}",
        (0..16)
            .map(|i| format!("  eth{}: 1 2 3 4 0 0 0 0 5 6 7 8 0 0 0 0\n", i))
            .collect::<String>()
    );

    c.bench_function("parse_diskstats", |b| {
        b.iter(|| parse_diskstats(&diskstats, |_| true).expect("Should parse"))
    });
    c.bench_function("parse_net_dev_drops", |b| {
        b.iter(|| parse_net_dev_drops(&netdev).expect("Should parse"))
    });
}

/// Benchmark JSON serialization of snapshots
fn bench_json_serialization(c: &mut Criterion) {
    let snapshot = sample_snapshot();

    c.bench_function("json_serialization", |b| {
        b.iter(|| serde_json::to_string(&snapshot).expect("Should serialize"))
    });
}

criterion_group!(
    benches,
    bench_snapshot_collection,
    bench_sampler_init,
    bench_format_bytes,
    bench_presence_variants,
    bench_proc_parsing,
    bench_json_serialization
);
criterion_main!(benches);
