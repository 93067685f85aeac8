//! Direct hybrid search handler

use crate::cli::output::print_candidates;
use crate::models::SearchFilters;
use crate::rag::HybridSearchTool;
use crate::AppConfig;
use crate::Result;

pub async fn handle_search_command(
    config: &AppConfig,
    query: String,
    max_price: u64,
    min_bedrooms: u32,
) -> Result<()> {
    let index = super::connect_index(config).await?;
    let search_tool = HybridSearchTool::from_config(index, &config.search);
    search_tool.ensure_ready().await?;

    let filters = SearchFilters::new(max_price, min_bedrooms);
    let candidates = search_tool.search(&query, &filters).await?;

    print_candidates(&query, &filters, &candidates);
    Ok(())
}
