//! Benchmarks for deckfit layout and pagination.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic decks of mixed content.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deckfit::{Deck, Deckfit, Element, LayoutEngine, PageConfig, Section, Slide, TableBlock};

fn numbered_lines(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Line {} of benchmark prose for pagination.", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates a slide with a prose column, a table column and a code block.
fn create_test_slide(index: usize, text_lines: usize) -> Slide {
    let rows: Vec<Vec<String>> = (0..text_lines)
        .map(|i| vec![format!("row {}", i), (i * 7).to_string()])
        .collect();
    let table = TableBlock::new(vec!["Name".into(), "Value".into()], rows).unwrap();

    Slide::new(format!("s{}", index))
        .with_title(format!("Slide {}", index))
        .with_footer("Benchmark")
        .with_sections(vec![
            Section::row("columns").with_subsections(vec![
                Section::content("prose").with_elements(vec![
                    Element::heading(2, "Overview"),
                    Element::text(numbered_lines(text_lines)),
                ]),
                Section::content("data").with_elements(vec![Element::table(table)]),
            ]),
            Section::content("code").with_elements(vec![Element::code(
                numbered_lines(text_lines / 2),
                Some("text"),
            )]),
        ])
}

fn create_test_deck(slide_count: usize, text_lines: usize) -> Deck {
    let mut deck = Deck::with_title("Benchmark");
    for i in 0..slide_count {
        deck.add_slide(create_test_slide(i, text_lines));
    }
    deck
}

/// Benchmark layout of a single slide.
fn bench_layout(c: &mut Criterion) {
    let engine = LayoutEngine::new(PageConfig::widescreen());
    let slide = create_test_slide(0, 8);

    c.bench_function("layout_slide", |b| {
        b.iter(|| engine.layout(black_box(slide.clone())));
    });
}

/// Benchmark pagination of slides with increasing overflow.
fn bench_paginate_slide(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_slide");
    let deckfit = Deckfit::new(PageConfig::widescreen());

    for lines in [5, 20, 80].iter() {
        let slide = create_test_slide(0, *lines);
        group.bench_function(format!("{}_lines", lines), |b| {
            b.iter(|| deckfit.paginate_slide(black_box(slide.clone())));
        });
    }

    group.finish();
}

/// Benchmark parallel and sequential deck pagination.
fn bench_paginate_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_deck");
    let deck = create_test_deck(64, 30);
    let parallel = Deckfit::new(PageConfig::widescreen());
    let sequential = Deckfit::new(PageConfig::widescreen()).sequential();

    group.bench_function("parallel", |b| {
        b.iter(|| parallel.paginate_deck(black_box(deck.clone())));
    });
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.paginate_deck(black_box(deck.clone())));
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_paginate_slide, bench_paginate_deck);
criterion_main!(benches);
