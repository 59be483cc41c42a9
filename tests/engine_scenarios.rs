use drusdenx_search::schema::FieldType;
use drusdenx_search::{Document, Engine, Filter, Query, RangeBounds, Schema, SchemaField, Value};

fn title_only_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_field("title", SchemaField::new(FieldType::String)).unwrap();
    schema
}

#[test]
fn s1_basic_retrieval() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(Document::new("").with_field("title", Value::String("Laptop Pro".into())), Some("1".into()))
        .unwrap();

    let result = engine.search(&Query::new("laptop"));
    assert_eq!(result.hits.len(), 1);
    assert_eq!(
        result.hits[0].document.get_field("title"),
        Some(&Value::String("Laptop Pro".into()))
    );
}

#[test]
fn s2_fuzzy_match() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(
            Document::new("").with_field("title", Value::String("The new Apple Laptop is great".into())),
            Some("1".into()),
        )
        .unwrap();

    let result = engine.search(&Query::new("laptob").tolerance(1));
    assert_eq!(result.hits.len(), 1);
}

#[test]
fn s3_phrase_vs_term() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(
            Document::new("").with_field("title", Value::String("the quick brown fox jumps over the lazy dog".into())),
            Some("1".into()),
        )
        .unwrap();
    engine
        .add(
            Document::new("").with_field("title", Value::String("a brown quick fox also jumps".into())),
            Some("2".into()),
        )
        .unwrap();

    let phrase_result = engine.search(&Query::new("\"quick brown\""));
    assert_eq!(phrase_result.hits.len(), 1);
    assert_eq!(phrase_result.hits[0].id, "1");

    let term_result = engine.search(&Query::new("quick brown"));
    assert_eq!(term_result.hits.len(), 2);
}

#[test]
fn s4_merged_proximity_outranks_split_terms() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(Document::new("").with_field("title", Value::String("buy a new macbook".into())), Some("a".into()))
        .unwrap();
    engine
        .add(Document::new("").with_field("title", Value::String("buy a mac book case".into())), Some("b".into()))
        .unwrap();

    let result = engine.search(&Query::new("buy mac book"));
    assert_eq!(result.hits.len(), 2);
    let doc_b_rank = result.hits.iter().position(|h| h.id == "b").unwrap();
    let doc_a_rank = result.hits.iter().position(|h| h.id == "a").unwrap();
    assert!(doc_b_rank < doc_a_rank, "doc with literal tokens 'mac' and 'book' should outrank 'macbook'");
}

fn filter_facet_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_field("title", SchemaField::new(FieldType::String)).unwrap();
    schema.add_field("brand", SchemaField::new(FieldType::String).facetable()).unwrap();
    schema.add_field("price", SchemaField::new(FieldType::Number).sortable()).unwrap();
    schema
}

#[test]
fn s5_filter_and_facets() {
    let mut engine = Engine::new(filter_facet_schema());
    let rows = [("A", 10.0), ("A", 20.0), ("B", 30.0)];
    for (i, (brand, price)) in rows.iter().enumerate() {
        engine
            .add(
                Document::new("")
                    .with_field("title", Value::String("doc".into()))
                    .with_field("brand", Value::String((*brand).into()))
                    .with_field("price", Value::Number(*price)),
                Some(i.to_string()),
            )
            .unwrap();
    }

    let result = engine.search(
        &Query::new("doc")
            .filter("price", Filter::Range(RangeBounds { gte: Some(15.0), ..Default::default() }))
            .facet("brand"),
    );

    assert_eq!(result.count, 2);
    let brand_counts = result.facets.get("brand").unwrap();
    assert_eq!(brand_counts.get("A"), Some(&1));
    assert_eq!(brand_counts.get("B"), Some(&1));
}

#[test]
fn s6_snapshot_round_trip_matches_queries() {
    let mut engine = Engine::new(filter_facet_schema());
    for i in 0..100 {
        engine
            .add(
                Document::new("")
                    .with_field("title", Value::String(format!("widget number {i}")))
                    .with_field("brand", Value::String(format!("brand_{}", i % 3)))
                    .with_field("price", Value::Number(i as f64)),
                None,
            )
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.index.bin");
    drusdenx_search::snapshot::save(&engine, &path).unwrap();
    let reloaded = drusdenx_search::snapshot::load(&path).unwrap();

    let queries = [
        Query::new("widget"),
        Query::new("number"),
        Query::new("widget").filter("brand", Filter::Term("brand_1".into())),
        Query::new("widget").filter("price", Filter::Range(RangeBounds { gte: Some(50.0), ..Default::default() })),
        Query::new("widget").facet("brand"),
        Query::new("nonexistent"),
        Query::new(""),
        Query::new("widget").tolerance(1),
        Query::new("\"widget number\""),
        Query::new("widget").limit(5),
    ];

    for query in queries {
        let original = engine.search(&query);
        let from_snapshot = reloaded.search(&query);
        assert_eq!(original.count, from_snapshot.count);
        assert_eq!(original.hits.len(), from_snapshot.hits.len());
        for (a, b) in original.hits.iter().zip(from_snapshot.hits.iter()) {
            assert_eq!(a.id, b.id);
            assert!((a.score - b.score).abs() < 1e-9);
        }
        assert_eq!(original.facets, from_snapshot.facets);
    }
}

#[test]
fn property_2_delete_leaves_no_trace() {
    let mut engine = Engine::new(filter_facet_schema());
    engine
        .add(
            Document::new("")
                .with_field("title", Value::String("unique widget".into()))
                .with_field("brand", Value::String("OnlyBrand".into()))
                .with_field("price", Value::Number(42.0)),
            Some("1".into()),
        )
        .unwrap();
    engine.delete("1").unwrap();

    assert!(engine.search(&Query::new("widget")).hits.is_empty());
    assert!(
        engine
            .search(&Query::new("").filter("brand", Filter::Term("OnlyBrand".into())))
            .hits
            .is_empty()
    );
    assert!(
        engine
            .search(&Query::new("").filter("price", Filter::Range(RangeBounds { gte: Some(0.0), ..Default::default() })))
            .hits
            .is_empty()
    );
}

#[test]
fn property_3_get_returns_merged_document() {
    let mut engine = Engine::new(title_only_schema());
    let id = engine
        .add(Document::new("").with_field("title", Value::String("Hello".into())), None)
        .unwrap();

    let fetched = engine.get_document(&id).unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.get_field("title"), Some(&Value::String("Hello".into())));
}

#[test]
fn property_6_exact_match_preempts_fuzzy() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(Document::new("").with_field("title", Value::String("laptop laptob".into())), Some("1".into()))
        .unwrap();

    // "laptop" is exactly in the vocabulary; a high tolerance must not cause
    // it to also match under some other token's fuzzy expansion weighting.
    let result = engine.search(&Query::new("laptop").tolerance(5));
    assert_eq!(result.hits.len(), 1);
}

#[test]
fn property_7_phrase_requires_consecutive_positions() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(
            Document::new("").with_field("title", Value::String("brown and then quick later".into())),
            Some("1".into()),
        )
        .unwrap();

    let result = engine.search(&Query::new("\"quick brown\""));
    assert!(result.hits.is_empty());
}

#[test]
fn empty_query_with_no_filters_returns_nothing() {
    let mut engine = Engine::new(title_only_schema());
    engine
        .add(Document::new("").with_field("title", Value::String("anything".into())), Some("1".into()))
        .unwrap();

    let result = engine.search(&Query::new(""));
    assert!(result.hits.is_empty());
    assert_eq!(result.count, 0);
}

#[test]
fn empty_query_with_filters_scores_uniformly() {
    let mut engine = Engine::new(filter_facet_schema());
    engine
        .add(
            Document::new("")
                .with_field("title", Value::String("one".into()))
                .with_field("brand", Value::String("A".into()))
                .with_field("price", Value::Number(1.0)),
            Some("1".into()),
        )
        .unwrap();

    let result = engine.search(&Query::new("").filter("brand", Filter::Term("A".into())));
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.hits[0].score, 1.0);
}

#[test]
fn string_list_field_is_tokenized_and_faceted_per_element() {
    let mut schema = Schema::new();
    schema.add_field("tags", SchemaField::new(FieldType::String).facetable()).unwrap();
    let mut engine = Engine::new(schema);
    engine
        .add(
            Document::new("").with_field(
                "tags",
                Value::StringList(vec!["outdoor".into(), "waterproof gear".into()]),
            ),
            Some("1".into()),
        )
        .unwrap();

    assert_eq!(engine.search(&Query::new("waterproof")).hits.len(), 1);
    let result = engine.search(&Query::new("").filter("tags", Filter::Term("outdoor".into())));
    assert_eq!(result.hits.len(), 1);
}
