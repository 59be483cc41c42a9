/// Complete drusdenx-search API demo
///
/// Demonstrates the major engine operations: schema setup, CRUD, search with
/// fuzzy/phrase/filter/facet variations, and snapshot save/load.
use drusdenx_search::schema::FieldType;
use drusdenx_search::{Document, Engine, Filter, Query, RangeBounds, Schema, SchemaField, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== drusdenx-search demo ===\n");

    let mut schema = Schema::new();
    schema.add_field("title", SchemaField::new(FieldType::String))?;
    schema.add_field("description", SchemaField::new(FieldType::String))?;
    schema.add_field("brand", SchemaField::new(FieldType::String).facetable())?;
    schema.add_field("price", SchemaField::new(FieldType::Number).sortable().facetable())?;

    let mut engine = Engine::new(schema);

    println!("Step 1: INSERT - adding documents");
    engine.add(
        Document::new("")
            .with_field("title", Value::String("Red Laptop Pro".into()))
            .with_field("description", Value::String("A fast laptop for programming".into()))
            .with_field("brand", Value::String("Acme".into()))
            .with_field("price", Value::Number(1200.0)),
        Some("1".into()),
    )?;
    engine.add(
        Document::new("")
            .with_field("title", Value::String("Blue Monitor".into()))
            .with_field("description", Value::String("A crisp 27 inch display".into()))
            .with_field("brand", Value::String("Zenith".into()))
            .with_field("price", Value::Number(300.0)),
        Some("2".into()),
    )?;
    engine.add(
        Document::new("")
            .with_field("title", Value::String("Laptop Stand".into()))
            .with_field("description", Value::String("Aluminum stand for laptops".into()))
            .with_field("brand", Value::String("Acme".into()))
            .with_field("price", Value::Number(45.0)),
        Some("3".into()),
    )?;
    println!("  inserted 3 documents\n");

    println!("Step 2: SEARCH - term query");
    let result = engine.search(&Query::new("laptop"));
    println!("  'laptop' -> {} hits", result.count);
    for hit in &result.hits {
        println!("    {} (score {:.3})", hit.id, hit.score);
    }
    println!();

    println!("Step 3: SEARCH - fuzzy query");
    let result = engine.search(&Query::new("laptob").tolerance(1));
    println!("  'laptob' (tolerance 1) -> {} hits\n", result.count);

    println!("Step 4: SEARCH - phrase query");
    let result = engine.search(&Query::new("\"fast laptop\""));
    println!("  '\"fast laptop\"' -> {} hits\n", result.count);

    println!("Step 5: SEARCH - filters and facets");
    let result = engine
        .search(&Query::new("").filter("brand", Filter::Term("Acme".into())).facet("brand"));
    println!("  brand=Acme -> {} hits, facets: {:?}\n", result.count, result.facets);

    let result = engine.search(
        &Query::new("laptop").filter(
            "price",
            Filter::Range(RangeBounds { lte: Some(100.0), ..Default::default() }),
        ),
    );
    println!("  'laptop' with price<=100 -> {} hits\n", result.count);

    println!("Step 6: UPDATE - modify a document");
    engine.update("2", Document::new("2").with_field("price", Value::Number(250.0)))?;
    println!("  updated document 2's price\n");

    println!("Step 7: DELETE - remove a document");
    engine.delete("3")?;
    println!("  deleted document 3, remaining count: {}\n", engine.document_count());

    println!("Step 8: SNAPSHOT - save and reload");
    let path = std::env::temp_dir().join("drusdenx-search-demo.index.bin");
    drusdenx_search::snapshot::save(&engine, &path)?;
    let reloaded = drusdenx_search::snapshot::load(&path)?;
    println!(
        "  reloaded snapshot has {} documents\n",
        reloaded.document_count()
    );

    println!("=== demo complete ===\n");
    Ok(())
}
