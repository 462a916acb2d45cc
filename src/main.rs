use cf_docs_mcp::cli::{Cli, Commands};
use cf_docs_mcp::server::DocServer;
use cf_docs_mcp::tools::{SearchRequest, render_search};
use cf_docs_mcp::worker::{DocState, build_index, spawn_index_build};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cf_docs_mcp::tracing::init(cli.log_json);

    let options = cli.source_options();
    match cli.command() {
        Commands::Stdio => {
            tracing::info!("Starting cf-docs-mcp MCP server");

            let state = Arc::new(DocState::new());
            let server = DocServer::new(Arc::clone(&state));
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;

            // Tools answer "Index not available" until this finishes
            spawn_index_build(state, options);

            service.waiting().await?;
        }
        Commands::Search {
            query,
            kind,
            category,
            limit,
        } => {
            let index = build_index(&options).await?;
            let request = SearchRequest {
                query,
                kind: kind.map(Into::into),
                category,
                limit: Some(limit),
            };
            println!("{}", render_search(&index, &request)?);
        }
        Commands::Stats => {
            let index = build_index(&options).await?;
            println!("{}", serde_json::to_string_pretty(&index.stats())?);
        }
    }

    Ok(())
}
