use std::sync::Arc;

use calla::{Field, IndexSearcher, IndexWriter, MemoryStore, QueryParser, SearchRequest};

async fn seeded() -> IndexSearcher {
    let store = Arc::new(MemoryStore::new());
    let writer = IndexWriter::new(store.clone());

    for (key, title) in [
        ("d1", "Rust systems programming"),
        ("d2", "Async programming with Tokio"),
        ("d3", "Cooking for beginners"),
        ("d4", "Rust and async together"),
    ] {
        writer
            .add_document(key, vec![Field::text("title", title)])
            .await
            .unwrap();
    }

    IndexSearcher::new(store)
}

#[tokio::test]
async fn test_parsed_term_query() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("Rust")))
        .await?;
    assert_eq!(results.total_hits, 2);
    Ok(())
}

#[tokio::test]
async fn test_parsed_and_query() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("rust AND async")))
        .await?;
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.hits[0].key, "d4");
    Ok(())
}

#[tokio::test]
async fn test_parsed_or_query() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("rust OR cooking")))
        .await?;
    assert_eq!(results.total_hits, 3);
    Ok(())
}

#[tokio::test]
async fn test_parsed_not_query() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("rust NOT async")))
        .await?;
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.hits[0].key, "d1");
    Ok(())
}

#[tokio::test]
async fn test_parsed_phrase_query() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("\"systems programming\"")))
        .await?;
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.hits[0].key, "d1");
    Ok(())
}

#[tokio::test]
async fn test_empty_query_matches_nothing() -> calla::Result<()> {
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher.search(SearchRequest::new(parser.parse(""))).await?;
    assert_eq!(results.total_hits, 0);
    assert!(results.hits.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_mixed_operators_have_no_precedence() -> calla::Result<()> {
    // Known limitation: operators bind left to right by token order only.
    // `cooking OR rust AND async` makes "async" a Must clause, so "cooking"
    // alone cannot satisfy the query even though a precedence-aware parser
    // would read it as `cooking OR (rust AND async)`.
    let searcher = seeded().await;
    let parser = QueryParser::new("title");

    let results = searcher
        .search(SearchRequest::new(parser.parse("cooking OR rust AND async")))
        .await?;
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.hits[0].key, "d4");
    Ok(())
}
