use std::sync::Arc;

use async_trait::async_trait;
use propmatch::embeddings::Embedder;
use propmatch::index::InMemoryIndex;
use propmatch::index::VectorIndex;
use propmatch::ingest::CorpusIndexer;
use propmatch::ingest::IndexMode;
use propmatch::Result;

/// Embeds by character classes; good enough for the indexer, which never ranks
struct ShapeEmbedder;

#[async_trait]
impl Embedder for ShapeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        let digits = text.chars().filter(char::is_ascii_digit).count();
        Ok(vec![letters as f32, digits as f32, 1.0])
    }

    fn dimension(&self) -> usize {
        3
    }
}

const CORPUS: &str = "\
Property ID,Price,Bedrooms,Bathrooms,Living Area (sq ft),Qualitative Description
P1,\"$450,000\",3,2,\"1,500\",Sunny family home with a garden
P2,1.2k,1,1,400,Tiny studio above a bakery
P3,call for price,2,1.5,850,Loft in a converted warehouse
,99k,1,1,300,Row without an id
";

fn write_corpus(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn setup() -> (Arc<InMemoryIndex>, CorpusIndexer) {
    let index = Arc::new(InMemoryIndex::new(Arc::new(ShapeEmbedder)));
    let indexer = CorpusIndexer::new(index.clone(), 2);
    (index, indexer)
}

#[tokio::test]
async fn test_index_file_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_corpus(&dir, "properties.csv", CORPUS);
    let (index, indexer) = setup();

    let report = indexer.index_file(&path, IndexMode::Upsert).await?;

    assert_eq!(report.indexed, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.zero_price, 1);
    assert_eq!(report.total_in_index, 3);
    assert_eq!(index.count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_documents_carry_flat_metadata() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_corpus(&dir, "properties.csv", CORPUS);
    let (index, indexer) = setup();
    indexer.index_file(&path, IndexMode::Upsert).await?;

    let documents = index.similarity_search("family home", 10).await?;
    let p1 = documents.iter().find(|d| d.id() == "P1").unwrap();

    assert_eq!(p1.metadata.price, 450_000);
    assert_eq!(p1.metadata.bedrooms, 3);
    assert_eq!(p1.metadata.sq_ft, 1500);
    assert_eq!(
        p1.content,
        "Sunny family home with a garden | Features: 3 Bed, 2 Bath, 1500 sqft."
    );

    let p2 = documents.iter().find(|d| d.id() == "P2").unwrap();
    assert_eq!(p2.metadata.price, 1200);
    Ok(())
}

#[tokio::test]
async fn test_reindexing_does_not_duplicate() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_corpus(&dir, "properties.csv", CORPUS);
    let (index, indexer) = setup();

    indexer.index_file(&path, IndexMode::Upsert).await?;
    let report = indexer.index_file(&path, IndexMode::Upsert).await?;

    assert_eq!(report.total_in_index, 3);
    assert_eq!(index.count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_rebuild_drops_stale_documents() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let full = write_corpus(&dir, "full.csv", CORPUS);
    let small = write_corpus(
        &dir,
        "small.csv",
        "Property ID,Price,Bedrooms,Bathrooms,Living Area (sq ft),Qualitative Description\nP9,200k,2,1,700,Canal-side flat\n",
    );
    let (index, indexer) = setup();

    indexer.index_file(&full, IndexMode::Upsert).await?;
    let report = indexer.index_file(&small, IndexMode::Rebuild).await?;

    assert_eq!(report.total_in_index, 1);
    let documents = index.similarity_search("flat", 10).await?;
    assert_eq!(documents[0].id(), "P9");
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let (_, indexer) = setup();
    let result = indexer
        .index_file("/definitely/not/here.csv", IndexMode::Upsert)
        .await;
    assert!(result.is_err());
}
