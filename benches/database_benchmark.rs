use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use drusdenx_search::schema::FieldType;
use drusdenx_search::{Document, Engine, Query, Schema, SchemaField, Value};
use rand::Rng;

fn test_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_field("title", SchemaField::new(FieldType::String)).unwrap();
    schema.add_field("content", SchemaField::new(FieldType::String)).unwrap();
    schema
        .add_field("category", SchemaField::new(FieldType::String).facetable())
        .unwrap();
    schema
        .add_field("score", SchemaField::new(FieldType::Number).sortable())
        .unwrap();
    schema
}

fn create_test_document(id: u64, content_size: usize) -> Document {
    let mut rng = rand::thread_rng();
    let content: String = (0..content_size)
        .map(|_| {
            let words = ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
            words[rng.gen_range(0..words.len())]
        })
        .collect::<Vec<_>>()
        .join(" ");

    Document::new(id.to_string())
        .with_field("title", Value::String(format!("Document {id}")))
        .with_field("content", Value::String(content))
        .with_field("category", Value::String(format!("category_{}", id % 10)))
        .with_field("score", Value::Number(rng.gen_range(0.0..100.0)))
}

fn bench_single_insert(c: &mut Criterion) {
    let mut engine = Engine::new(test_schema());

    c.bench_function("single_document_insert", |b| {
        let mut id = 0u64;
        b.iter(|| {
            let doc = create_test_document(id, 100);
            engine.add(doc, None).unwrap();
            id += 1;
        });
    });
}

fn bench_batch_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_insert");

    for batch_size in [10, 50, 100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), batch_size, |b, &batch_size| {
            let mut engine = Engine::new(test_schema());
            let mut id_counter = 0u64;

            b.iter(|| {
                for _ in 0..batch_size {
                    let doc = create_test_document(id_counter, 100);
                    engine.add(doc, None).unwrap();
                    id_counter += 1;
                }
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut engine = Engine::new(test_schema());
    for i in 0..1000 {
        engine.add(create_test_document(i, 100), None).unwrap();
    }

    let mut group = c.benchmark_group("search");

    group.bench_function("simple_term_search", |b| {
        b.iter(|| black_box(engine.search(&Query::new("fox"))));
    });

    group.bench_function("fuzzy_search_distance_1", |b| {
        b.iter(|| black_box(engine.search(&Query::new("quik").tolerance(1))));
    });

    group.bench_function("phrase_search", |b| {
        b.iter(|| black_box(engine.search(&Query::new("\"quick brown fox\""))));
    });

    group.bench_function("category_filter_with_facets", |b| {
        b.iter(|| {
            black_box(
                engine.search(
                    &Query::new("fox")
                        .filter("category", drusdenx_search::Filter::Term("category_5".into()))
                        .facet("category"),
                ),
            )
        });
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.sample_size(10);

    group.bench_function("index_throughput", |b| {
        b.iter_custom(|iters| {
            let mut engine = Engine::new(test_schema());
            let start = std::time::Instant::now();
            for i in 0..iters {
                engine.add(create_test_document(i, 100), None).unwrap();
            }
            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_insert, bench_batch_insert, bench_search, bench_throughput);
criterion_main!(benches);
