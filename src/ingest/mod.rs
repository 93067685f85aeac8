//! Corpus ingestion: CSV property records -> indexed documents
//!
//! Expected headers:
//! `Property ID, Price, Bedrooms, Bathrooms, Living Area (sq ft), Qualitative Description`.
//! Bad numeric cells never fail the load; they normalize to 0 and are logged.

pub mod price;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;
use csv::StringRecord;
use csv::Trim;
pub use price::parse_price;
pub use price::try_parse_price;
use serde::Deserialize;
use tracing::info;
use tracing::warn;

use crate::errors::Result;
use crate::index::VectorIndex;
use crate::models::IndexedDocument;
use crate::models::PropertyRecord;

#[derive(Debug, Deserialize)]
struct RawPropertyRow {
    #[serde(rename = "Property ID")]
    id: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Bedrooms")]
    bedrooms: String,
    #[serde(rename = "Bathrooms")]
    bathrooms: String,
    #[serde(rename = "Living Area (sq ft)")]
    sq_ft: String,
    #[serde(rename = "Qualitative Description")]
    description: String,
}

impl RawPropertyRow {
    fn normalize(self, line: u64) -> PropertyRecord {
        let price = price::try_parse_price(&self.price).unwrap_or_else(|| {
            warn!("Line {line}: unparseable price {:?} for {}, using 0", self.price, self.id);
            0
        });
        let bedrooms = price::parse_count(&self.bedrooms).unwrap_or_else(|| {
            warn!("Line {line}: unparseable bedrooms {:?} for {}, using 0", self.bedrooms, self.id);
            0
        });
        let bathrooms = price::parse_decimal(&self.bathrooms).unwrap_or_else(|| {
            warn!("Line {line}: unparseable bathrooms {:?} for {}, using 0", self.bathrooms, self.id);
            0.0
        });
        let sq_ft = price::parse_count(&self.sq_ft).unwrap_or_else(|| {
            warn!("Line {line}: unparseable living area {:?} for {}, using 0", self.sq_ft, self.id);
            0
        });

        PropertyRecord {
            id: self.id,
            price,
            bedrooms,
            bathrooms,
            sq_ft,
            description: self.description,
        }
    }
}

/// Records read from a corpus file
#[derive(Debug, Default)]
pub struct CorpusLoad {
    pub records: Vec<PropertyRecord>,
    /// Rows dropped for having no property id
    pub skipped: usize,
}

/// Parse corpus CSV from any reader
pub fn parse_corpus<R: Read>(reader: R) -> Result<CorpusLoad> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = StringRecord::new();
    let mut load = CorpusLoad::default();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, csv::Position::line);
        let row: RawPropertyRow = record.deserialize(Some(&headers))?;
        if row.id.is_empty() {
            warn!("Line {line}: row without a property id, skipping");
            load.skipped += 1;
            continue;
        }
        load.records.push(row.normalize(line));
    }

    Ok(load)
}

/// Read a corpus file. UTF-8 is tried first, then Latin-1.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<CorpusLoad> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} is not valid UTF-8, decoding as Latin-1",
                path.as_ref().display()
            );
            // Latin-1 maps each byte to the code point of the same value
            e.into_bytes().into_iter().map(char::from).collect()
        }
    };
    parse_corpus(text.as_bytes())
}

/// What to do with documents already in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    /// Replace documents with the same property id, keep the rest
    Upsert,
    /// Clear the index first
    Rebuild,
}

/// Outcome of one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub indexed: usize,
    pub skipped: usize,
    pub zero_price: usize,
    pub total_in_index: usize,
}

/// Writes property records into a vector index
pub struct CorpusIndexer {
    index: Arc<dyn VectorIndex>,
    batch_size: usize,
}

impl CorpusIndexer {
    pub fn new(index: Arc<dyn VectorIndex>, batch_size: usize) -> Self {
        Self {
            index,
            batch_size: batch_size.max(1),
        }
    }

    /// Load a CSV file and index every record in it
    pub async fn index_file<P: AsRef<Path>>(&self, path: P, mode: IndexMode) -> Result<IndexReport> {
        info!("Loading corpus from {}", path.as_ref().display());
        let load = load_corpus(path)?;
        let mut report = self.index_records(&load.records, mode).await?;
        report.skipped = load.skipped;
        Ok(report)
    }

    /// Index already-normalized records
    pub async fn index_records(
        &self,
        records: &[PropertyRecord],
        mode: IndexMode,
    ) -> Result<IndexReport> {
        if mode == IndexMode::Rebuild {
            info!("Rebuild requested, clearing index");
            self.index.clear().await?;
        }

        let documents: Vec<IndexedDocument> =
            records.iter().map(PropertyRecord::to_document).collect();

        let mut indexed = 0;
        for batch in documents.chunks(self.batch_size) {
            indexed += self.index.upsert(batch).await?;
            info!("Indexed {}/{} documents", indexed, documents.len());
        }

        let report = IndexReport {
            indexed,
            skipped: 0,
            zero_price: records.iter().filter(|r| r.price == 0).count(),
            total_in_index: self.index.count().await?,
        };

        info!(
            "✅ Indexed {} properties ({} with unknown price), index now holds {}",
            report.indexed, report.zero_price, report.total_in_index
        );
        Ok(report)
    }
}
