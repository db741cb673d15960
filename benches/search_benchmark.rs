use book_search::models::book::{BookRecord, PrivilegedBook, RestrictedBook};
use book_search::models::search::SearchRequest;
use book_search::services::classifier::classify;
use book_search::services::statement::{build, DEFAULT_TERM_LIMIT};
use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn term_request() -> SearchRequest {
    SearchRequest {
        source: "client".to_string(),
        title: "dragon".to_string(),
        ..Default::default()
    }
}

fn advanced_request() -> SearchRequest {
    SearchRequest {
        source: "admin".to_string(),
        advanced: true,
        title: "Go".to_string(),
        author: "Pike".to_string(),
        publisher: "X".to_string(),
        category: 3,
        ..Default::default()
    }
}

fn create_sample_books(count: i64) -> Vec<BookRecord> {
    (0..count)
        .map(|i| {
            BookRecord::Privileged(PrivilegedBook {
                book: RestrictedBook {
                    isbn: (9780000000000 + i).to_string(),
                    title: format!("Test Book {}", i),
                    author: format!("Test Author {}", i % 50),
                    publisher: "Test Press".to_string(),
                    publication_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                    description: "A book used for benchmarking".to_string(),
                    price: 10.0 + (i % 20) as f64,
                    rental_price_per_day: 0.5,
                },
                quantity: i % 7,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            })
        })
        .collect()
}

fn benchmark_classify(c: &mut Criterion) {
    let request = advanced_request();

    c.bench_function("classify", |b| b.iter(|| classify(black_box(&request))));
}

fn benchmark_build_term_statement(c: &mut Criterion) {
    let classification = classify(&term_request()).unwrap();

    c.bench_function("build_term_statement", |b| {
        b.iter(|| {
            build(
                black_box(classification.role),
                black_box(&classification.shape),
                DEFAULT_TERM_LIMIT,
            )
        })
    });
}

fn benchmark_encode_results(c: &mut Criterion) {
    let staff = create_sample_books(50);
    let client: Vec<BookRecord> = staff
        .iter()
        .cloned()
        .map(|record| BookRecord::Restricted(record.into_restricted()))
        .collect();

    c.bench_function("encode_privileged_results", |b| {
        b.iter(|| serde_json::to_vec(black_box(&staff)).unwrap())
    });

    c.bench_function("encode_restricted_results", |b| {
        b.iter(|| serde_json::to_vec(black_box(&client)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_classify,
    benchmark_build_term_statement,
    benchmark_encode_results
);
criterion_main!(benches);
