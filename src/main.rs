use chrono::TimeDelta;
use metric_windows::{
    Builder, Granularity, GroupedAggregation, RawSample, SampleValue, SeriesMeta, Value,
};
use std::time::Instant;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    env_logger::builder()
        .filter_module("metric_windows", log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let granularity = Granularity::parse(&std::env::args().nth(1).unwrap_or_default());
    let builder = Builder::new().granularity(granularity);
    let profile = builder.profile();

    let now = metric_windows::timestamp();
    let start_time = profile.start_time(now);

    log::info!(
        "granularity {granularity}: window {}, alignment period {}, querying since {start_time}",
        profile.window,
        profile.alignment_period,
    );

    let mut group = GroupedAggregation::new(builder);

    // One data point per alignment period of the fine granularity, most recent first
    let step = TimeDelta::minutes(1);
    let n = (now - start_time).num_minutes().min(100_000);

    {
        use rand::Rng;

        let mut rng = rand::thread_rng();

        for disk in ["pd-0", "pd-1", "pd-2"] {
            let meta = SeriesMeta {
                resource: disk.into(),
                metric: "disk.read_ops".into(),
                unit: "1".into(),
                location: "us-east1-b".into(),
                project: "demo".into(),
            };

            let samples = (0..n).map(|idx| {
                // Generate a value that is low for the most recent hour, then high
                let base_value: Value = if idx < 60 { 10.0 } else { 75.0 };

                // Add some random variation
                let value = (base_value + rng.gen_range(-5.0..5.0)).max(0.0);

                // Some exporters report counters as strings
                let value = if idx % 3 == 0 {
                    SampleValue::String(format!("{value:.3}"))
                } else {
                    SampleValue::Double(value)
                };

                RawSample::new(value, now - step * i32::try_from(idx).unwrap_or(i32::MAX))
            });

            group.push(meta, samples.collect::<Vec<_>>());
        }
    }

    let start = Instant::now();
    let rows = group.rows();
    log::info!("aggregated {} rows in {:?}", rows.len(), start.elapsed());

    for row in rows.iter().take(10) {
        log::info!(
            "{} {}: max={:.2} min={:.2} sum={:.2} avg={:.2} count={}",
            row.meta.resource,
            row.stat.timestamp,
            row.stat.maximum,
            row.stat.minimum,
            row.stat.sum,
            row.stat.average,
            row.stat.sample_count,
        );
    }
}
