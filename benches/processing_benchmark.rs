use chrono::{Datelike, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weatherman::models::{AveragingStrategy, DailyRecord, MissingValuePolicy, Period};
use weatherman::processors::{AverageAggregator, ExtremeAggregator, YearMonthFilter};
use weatherman::readers::RecordParser;

// Create a station file covering `days` days from the start of 2023
fn create_station_file(days: usize) -> String {
    let mut content = String::from(
        "PKT,Max TemperatureC,Mean TemperatureC,Min TemperatureC,Max Humidity, Mean Humidity\n",
    );
    let base_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        let high = 20 + (day % 17) as i32;
        let low = high - 9;
        content.push_str(&format!(
            "{}-{}-{},{},{},{},{},{}\n",
            date.year(),
            date.month(),
            date.day(),
            high,
            (high + low) / 2,
            low,
            50 + (day % 45),
            40
        ));
    }

    content
}

fn create_records(days: usize) -> Vec<DailyRecord> {
    let content = create_station_file(days);
    RecordParser::new().parse(&content).unwrap().collect()
}

fn benchmark_record_parser(c: &mut Criterion) {
    let content = create_station_file(365);
    let parser = RecordParser::new();

    c.bench_function("record_parser_365_days", |b| {
        b.iter(|| {
            let count = parser.parse(black_box(&content)).unwrap().count();
            black_box(count)
        })
    });
}

fn benchmark_extremes(c: &mut Criterion) {
    let records = create_records(365);
    let filter = YearMonthFilter::new(Period::year(2023));

    c.bench_function("extreme_aggregator_10_files", |b| {
        b.iter(|| {
            let mut aggregator =
                ExtremeAggregator::new(Period::year(2023), MissingValuePolicy::TreatAsZero);
            for _ in 0..10 {
                aggregator.add_file(filter.apply(records.iter().cloned()));
            }
            black_box(aggregator.finish())
        })
    });
}

fn benchmark_varying_file_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_averages_by_file_count");
    let records = create_records(365);
    let period = Period::new(2023, Some(6)).unwrap();
    let filter = YearMonthFilter::new(period);

    for files in [1, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("files", files), files, |b, &files| {
            b.iter(|| {
                let mut aggregator = AverageAggregator::new(
                    period,
                    MissingValuePolicy::TreatAsZero,
                    AveragingStrategy::EqualWeightPerFile,
                );
                for _ in 0..files {
                    aggregator.add_file(filter.apply(records.iter().cloned()));
                }
                black_box(aggregator.finish())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_record_parser,
    benchmark_extremes,
    benchmark_varying_file_counts
);
criterion_main!(benches);
