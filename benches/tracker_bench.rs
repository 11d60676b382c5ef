//! Benchmarks for PulseTrack rendering and persistence
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pulsetrack::*;
use tempfile::tempdir;

fn create_test_state(count: usize) -> AppState {
    let mut state = AppState::new();
    for i in 0..count {
        state.prepend_workout(WorkoutEntry {
            name: format!("Workout {}", i),
            duration: 30.0 + (i % 60) as f64,
            intensity: Intensity::Medium,
            notes: NO_NOTES.to_string(),
        });
        state.prepend_calorie(CalorieEntry {
            meal: format!("Meal {}", i),
            calories: 250.0 + (i % 500) as f64,
            time: "12:30".to_string(),
            date: "2024-03-01".to_string(),
        });
        state.prepend_weight(WeightEntry {
            weight: 150.0 - (i % 10) as f64 * 0.5,
            date: format!("2024-{:02}-{:02}", 1 + i % 12, 1 + i % 28),
            notes: NO_NOTES.to_string(),
        });
    }
    state
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [10, 100, 1000] {
        let state = create_test_state(size);

        group.throughput(Throughput::Elements(state.total_entries() as u64));

        group.bench_function(format!("render_all_{}", size), |b| {
            b.iter(|| render_all(black_box(&state)))
        });

        group.bench_function(format!("summary_{}", size), |b| {
            b.iter(|| compute_summary(black_box(&state)))
        });

        let view = render_all(&state);
        group.bench_function(format!("to_html_{}", size), |b| {
            b.iter(|| black_box(&view).to_html())
        });
    }

    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");
    let state = create_test_state(1000);

    group.bench_function("save_memory_1000", |b| {
        let mut store = PersistentStore::new(MemoryStore::new());
        b.iter(|| store.save(black_box(&state)).unwrap())
    });

    group.bench_function("save_file_1000", |b| {
        let dir = tempdir().unwrap();
        let mut store = PersistentStore::new(FileStore::open(dir.path()).unwrap());
        b.iter(|| store.save(black_box(&state)).unwrap())
    });

    group.bench_function("load_file_1000", |b| {
        let dir = tempdir().unwrap();
        let mut store = PersistentStore::new(FileStore::open(dir.path()).unwrap());
        store.save(&state).unwrap();
        b.iter(|| store.load().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_persistence);
criterion_main!(benches);
