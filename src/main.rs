//! Command-line entry point
//!
//! Two subcommands drive the pipeline:
//! - `crawl` walks a site and prints the documents it would ingest, without
//!   touching any model or store
//! - `ingest` runs the full pipeline and loads the result into Chroma
//!
//! Endpoints and credentials come from the environment; see
//! [`Settings`](webingest::config::Settings).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use webingest::config::Settings;
use webingest::crawler::{crawl_site, CrawlerConfig, HttpFetcher};
use webingest::extractor::extract_documents;
use webingest::loader::ChromaStore;
use webingest::model::{AzureChatCompletion, AzureEmbedding, Client};
use webingest::pipeline::ingest_site;
use webingest::processor::ProcessorConfig;

#[derive(Parser)]
#[command(author, version, about = "Crawl a website and load its content into a vector store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a website and print the documents that would be ingested
    Crawl(CrawlArgs),

    /// Crawl, process, and load a website into the vector store
    Ingest(IngestArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL of the site to crawl
    #[arg(required = true)]
    url: String,

    /// Maximum number of pages to record (default: PROCESS_PAGES_LIMIT)
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// URL of the site to ingest
    #[arg(required = true)]
    url: String,

    /// Maximum number of pages to record (default: PROCESS_PAGES_LIMIT)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Chunk size in characters (default: CHUNK_SIZE)
    #[arg(short, long)]
    chunk_size: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Crawl(args) => crawl_command(args).await,
        Commands::Ingest(args) => ingest_command(args).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let config = CrawlerConfig::builder()
        .page_limit(args.limit.unwrap_or(settings.page_limit))
        .build();

    let fetcher = HttpFetcher::new(config.fetch_timeout(), &config.user_agent)?;
    let pages = crawl_site(&fetcher, &args.url, &config).await?;
    println!("Crawled {} pages from {}", pages.len(), args.url);

    let documents = extract_documents(&args.url, &pages)?;
    let mut ids: Vec<&String> = documents.keys().collect();
    ids.sort();
    for id in ids {
        let doc = &documents[id];
        println!(
            "  {id}: {} chars from {}",
            doc.content.chars().count(),
            doc.metadata.source
        );
    }

    Ok(())
}

async fn ingest_command(args: IngestArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env();

    let completion =
        AzureChatCompletion::new(&settings.completion_endpoint, &settings.completion_key)
            .context("chat-completions endpoint is not configured")?;
    let embedding = AzureEmbedding::new(
        &settings.openai_endpoint,
        &settings.openai_key,
        &settings.embeddings_deployment,
        &settings.openai_api_version,
    )
    .context("embeddings endpoint is not configured")?;
    let client = Client::new(completion, embedding);

    let store = ChromaStore::new(&settings.chroma_url)
        .with_context(|| format!("invalid CHROMA_URL: {}", settings.chroma_url))?;

    let crawler_config = CrawlerConfig::builder()
        .page_limit(args.limit.unwrap_or(settings.page_limit))
        .build();
    let fetcher = HttpFetcher::new(crawler_config.fetch_timeout(), &crawler_config.user_agent)?;
    let processor_config = ProcessorConfig::builder()
        .chunk_size(args.chunk_size.unwrap_or(settings.chunk_size))
        .build();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Ingesting {}", args.url));

    let report = ingest_site(
        &fetcher,
        &client,
        &store,
        &args.url,
        &crawler_config,
        &processor_config,
    )
    .await?;

    spinner.finish_with_message(format!(
        "Ingested {}: {} pages, {} documents, {} embedded",
        args.url, report.pages, report.documents, report.embedded
    ));

    Ok(())
}
