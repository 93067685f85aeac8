//! Corpus indexing handler

use std::path::PathBuf;

use crate::cli::output::print_index_report;
use crate::cli::output::print_info;
use crate::ingest::CorpusIndexer;
use crate::ingest::IndexMode;
use crate::AppConfig;
use crate::Result;

pub async fn handle_index_command(config: &AppConfig, csv: Option<PathBuf>, rebuild: bool) -> Result<()> {
    let path = csv.unwrap_or_else(|| PathBuf::from(&config.corpus.path));
    let mode = if rebuild {
        IndexMode::Rebuild
    } else {
        IndexMode::Upsert
    };

    print_info(&format!("📂 Indexing {} ({:?})", path.display(), mode));

    let index = super::connect_index(config).await?;
    let indexer = CorpusIndexer::new(index, config.embeddings.batch_size);
    let report = indexer.index_file(&path, mode).await?;

    print_index_report(&report);
    Ok(())
}
