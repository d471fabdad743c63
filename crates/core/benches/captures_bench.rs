#[path = "common/group_light.rs"]
mod group_light;
#[path = "common/tier.rs"]
mod bench_tier;

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use pdfcapture_core::area::Area;
use pdfcapture_core::capture::{
    CapturedEntity, Captures, ColumnEntity, LineEntity, LineSetEntity, RectangleEntity,
};

use bench_tier::bench_tier;
use group_light::configure_group_light;

const ROWS_PER_PAGE: u32 = 40;
const COLUMNS: [&str; 4] = ["sku", "description", "qty", "price"];

fn synthetic_pages(pages: u32) -> BTreeMap<u32, Vec<CapturedEntity>> {
    let area = Area::new(0.0, 800.0, 600.0, 0.0).expect("valid area");
    let mut by_page = BTreeMap::new();
    for page in 1..=pages {
        let lines = (0..ROWS_PER_PAGE)
            .map(|row| {
                let columns = COLUMNS
                    .iter()
                    .map(|col| ColumnEntity::new(page, *col, format!("{col}-{page}-{row}"), area))
                    .collect();
                LineEntity::new(page, "Items", columns, area, "|")
            })
            .collect();
        by_page.insert(
            page,
            vec![
                RectangleEntity::new(page, "PageTotal", format!("{page}.00"), area).into(),
                LineSetEntity::new("Items", page, lines).into(),
            ],
        );
    }
    by_page
}

fn bench_captures(c: &mut Criterion) {
    let tier = bench_tier();
    let pages = tier.page_count();

    let by_page = synthetic_pages(pages);
    let entities: usize = by_page.values().map(Vec::len).sum();

    let mut group = c.benchmark_group("captures");
    configure_group_light(&mut group, tier, entities as u64);

    group.bench_with_input(BenchmarkId::new("index", pages), &by_page, |b, by_page| {
        b.iter(|| black_box(Captures::new(by_page.clone())))
    });

    let captures = Captures::new(by_page);
    group.bench_with_input(
        BenchmarkId::new("project", pages),
        &captures,
        |b, captures| b.iter(|| black_box(captures.project().expect("projection"))),
    );
    group.bench_with_input(
        BenchmarkId::new("lines_view", pages),
        &captures,
        |b, captures| {
            b.iter(|| {
                let rows = captures.lines("Items").expect("lines view").rows().count();
                black_box(rows)
            })
        },
    );
    group.finish();
}

criterion_group!(benches, bench_captures);
criterion_main!(benches);
