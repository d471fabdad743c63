use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Throughput};

use crate::bench_tier::BenchTier;

/// Settings for in-memory aggregation benches, reported per captured entity.
///
/// The full tier adds warm-up for its larger documents.
pub fn configure_group_light<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    tier: BenchTier,
    entities: u64,
) {
    let (sample_size, warm_up, measurement) = match tier {
        BenchTier::Quick => (60, Duration::from_millis(500), Duration::from_secs(2)),
        BenchTier::Full => (100, Duration::from_secs(2), Duration::from_secs(6)),
    };
    group.sample_size(sample_size);
    group.warm_up_time(warm_up);
    group.measurement_time(measurement);
    group.throughput(Throughput::Elements(entities));
}
