// benches/roster.rs
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tm_scrape::core::html;
use tm_scrape::specs::squad;

fn load_sample() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/squad_roster_bvb_2019.html");
    std::fs::read_to_string(path).expect("read roster fixture")
}

fn bench_roster(c: &mut Criterion) {
    let page = load_sample();
    let today = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");

    c.bench_function("roster_parse_html", |b| {
        b.iter(|| black_box(html::parse(black_box(&page))))
    });

    let doc = html::parse(&page);
    c.bench_function("roster_rows", |b| {
        b.iter(|| {
            let ds = squad::parse_roster_at(black_box(&doc), today).expect("roster parses");
            black_box(ds.len())
        })
    });
}

criterion_group!(benches, bench_roster);
criterion_main!(benches);
