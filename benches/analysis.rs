use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pm25_analysis::{correlation_table, hourly_means, summarize, Dataset, Observation, Variable};

/// A year of hourly rows with a daily PM2.5 cycle that falls with wind speed.
fn synthetic_year() -> Dataset {
    let start = NaiveDate::from_ymd_opt(2016, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");
    let observations: Vec<Observation> = (0..24 * 365)
        .map(|i| {
            let hour = (i % 24) as f64;
            let wind = 1.0 + (i % 7) as f64 * 0.6;
            let temp = 12.0 + 10.0 * (hour / 24.0 * std::f64::consts::TAU).sin();
            Observation::empty(start + Duration::hours(i))
                .with(Variable::Pm25, 90.0 - 8.0 * wind + (24.0 - hour))
                .with(Variable::Temperature, temp)
                .with(Variable::Rain, if i % 50 == 0 { 1.2 } else { 0.0 })
                .with(Variable::Pressure, 1010.0 + (i % 13) as f64)
                .with(Variable::DewPoint, temp - 8.0)
                .with(Variable::WindSpeed, wind)
        })
        .collect();
    Dataset::from_observations(&observations).expect("synthetic dataset is valid")
}

fn bench_analysis(c: &mut Criterion) {
    let dataset = synthetic_year();
    c.bench_function("summarize", |b| b.iter(|| summarize(black_box(&dataset))));
    c.bench_function("hourly_means", |b| {
        b.iter(|| hourly_means(black_box(&dataset)))
    });
    c.bench_function("correlation_table", |b| {
        b.iter(|| correlation_table(black_box(&dataset), &Variable::PREDICTORS))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
