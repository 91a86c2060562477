//! hera-server binary entrypoint.

use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hera::cli::output::Output;
use hera::cli::{Cli, Commands};
use hera::{pipeline, AppState, Config, Embedder, FastembedEmbedder, LlmClient, OllamaClient};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hera=debug,hera_vector=debug"
    } else {
        "hera=info,hera_vector=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn init_state(config: Config) -> anyhow::Result<AppState> {
    let embedder: Arc<dyn Embedder> =
        Arc::new(FastembedEmbedder::new(&config.rag.embedding_model)?);
    let llm: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(
        &config.llm.ollama_url,
        config.llm.model.clone(),
    ));
    Ok(AppState::init(config, embedder, llm).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = Config::from_env()?;

    match cli.command {
        Commands::Build => {
            output.banner();
            output.info(&format!(
                "Loading embedding model {}...",
                config.rag.embedding_model
            ));
            let embedder: Arc<dyn Embedder> =
                Arc::new(FastembedEmbedder::new(&config.rag.embedding_model)?);

            output.info(&format!(
                "Building corpus from {}...",
                config.data.source_dir.display()
            ));
            let report = pipeline::build(&config, embedder).await?;

            output.success(&format!(
                "Indexed {} chunks from {} source(s) ({} dims, {})",
                report.chunks, report.sources, report.dimensions, report.embedding_model
            ));
        }

        Commands::Search { query, k } => {
            let k = k.unwrap_or(config.rag.top_k);
            let state = init_state(config).await?;

            let retrieved = state.retriever.search(&query, k).await?;
            output.retrieved(&retrieved);
            state.shutdown();
        }

        Commands::Ask { question, faq, k } => {
            let question = match (question, faq) {
                (Some(q), _) => q,
                (None, Some(topic)) => topic.query().to_string(),
                (None, None) => bail!("Provide a question or pick one with --faq"),
            };
            if question.trim().is_empty() {
                bail!("Please enter a question");
            }

            let k = k.unwrap_or(config.rag.top_k);
            let state = init_state(config).await?;

            output.info("Searching...");
            let retrieved = state.retriever.search(&question, k).await?;

            output.info("Generating answer...");
            match state.generator.generate_answer(&question, &retrieved).await {
                Ok(answer) => {
                    output.answer(&answer);
                    output.retrieved(&retrieved);
                }
                Err(e) => {
                    output.error(&format!("An error occurred: {e}"));
                    output.warn("Try rephrasing your question and asking again");
                    state.shutdown();
                    std::process::exit(1);
                }
            }
            state.shutdown();
        }
    }

    Ok(())
}
