use drusdenx_search::schema::FieldType;
use drusdenx_search::{Config, Document, Engine, Query, Schema, SchemaField, Value};

/// Thin CLI front end: builds a small in-memory collection from stdin-free
/// sample data and runs one query, printing the ranked hits. Exists to give
/// the crate a runnable entry point beyond its library API and demos.
fn main() -> drusdenx_search::Result<()> {
    let config = Config::default();

    let mut schema = Schema::new();
    schema.add_field("title", SchemaField::new(FieldType::String))?;
    schema.add_field("body", SchemaField::new(FieldType::String))?;

    let mut engine = Engine::from_config(&config, schema);
    engine.add(
        Document::new("")
            .with_field("title", Value::String("Getting started".into()))
            .with_field("body", Value::String("How to install and configure the engine".into())),
        Some("intro".into()),
    )?;
    engine.add(
        Document::new("")
            .with_field("title", Value::String("Advanced queries".into()))
            .with_field("body", Value::String("Filters, facets and fuzzy matching explained".into())),
        Some("advanced".into()),
    )?;

    let query = std::env::args().nth(1).unwrap_or_else(|| "engine".to_string());
    let result = engine.search(&Query::new(query.clone()));

    println!("query: {query:?} -> {} hits ({:?})", result.count, result.elapsed);
    for hit in result.hits {
        println!("  {} (score {:.4})", hit.id, hit.score);
    }

    Ok(())
}
