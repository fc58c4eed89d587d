use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meteoview::{hourly_window, resample_daily, DailyData, Forecast, HourlyData};

/// A payload at the dashboard's maximum scale: 16 days, 384 hourly samples.
fn dashboard_payload() -> Forecast {
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let start = first_day.and_hms_opt(0, 0, 0).unwrap();
    Forecast {
        latitude: 1.3521,
        longitude: 103.8198,
        timezone: None,
        daily: DailyData {
            time: (0..16i64).map(|d| first_day + Duration::days(d)).collect(),
            temperature_2m_max: vec![31.0; 16],
            temperature_2m_min: vec![25.0; 16],
        },
        hourly: HourlyData {
            time: (0..384i64).map(|h| start + Duration::hours(h)).collect(),
            temperature_2m: (0..384i32)
                .map(|h| 26.0 + f64::from(h % 24) * 0.2)
                .collect(),
            relative_humidity_2m: (0..384i32).map(|h| 70.0 + f64::from(h % 24)).collect(),
            direct_radiation: (0..384i32)
                .map(|h| if (7..=19).contains(&(h % 24)) { 120.0 } else { 0.0 })
                .collect(),
        },
    }
}

fn bench_chart_transforms(c: &mut Criterion) {
    let forecast = dashboard_payload();
    let now: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 3)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    c.bench_function("resample_daily", |b| {
        b.iter(|| resample_daily(black_box(&forecast)))
    });
    c.bench_function("hourly_window", |b| {
        b.iter(|| hourly_window(black_box(&forecast), black_box(now), 72))
    });
}

criterion_group!(benches, bench_chart_transforms);
criterion_main!(benches);
