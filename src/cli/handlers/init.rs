//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::database::DOCUMENTS_TABLE;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig, force: bool) -> Result<()> {
    if !force {
        print_warning("This will create the pgvector extension, documents table and vector index.");
        print_warning("This operation is safe - it uses CREATE IF NOT EXISTS.");
        println!("\nUse --force to proceed.");
        return Ok(());
    }

    print_info("🗄️  Initializing PropMatch database...");
    let database = Database::from_config(config).await?;

    if let Err(e) = database.init_schema(config.embedding_dimension()).await {
        let message = e.to_string();
        if message.contains("vector") || message.contains("extension") {
            print_warning(&format!("Could not enable pgvector extension: {e}"));
            print_warning("Please run on the database server:");
            println!("  psql -c 'CREATE EXTENSION IF NOT EXISTS vector;'");
            println!();
            println!("Then run: propmatch init --force");
        }
        return Err(e);
    }

    print_success(&format!(
        "Table {DOCUMENTS_TABLE} ready (VECTOR({}))",
        config.embedding_dimension()
    ));
    println!();
    print_info("To load properties, run:");
    println!("   propmatch index {}", config.corpus.path);

    Ok(())
}
