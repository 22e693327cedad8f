use clap::{Parser, Subcommand};
use cloudsearch_gateway::batch::{BatchResult, BatchStatus};
use reqwest::header::HOST;
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloudsearch-cli")]
#[command(about = "CloudSearch gateway CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// Endpoint host identifying the domain,
    /// e.g. search-companies-00000000000000000000000000.localhost
    #[arg(short = 'H', long)]
    domain_host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post an SDF batch file to the document service
    PostSdf {
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Run a search
    Search {
        /// Simple query
        #[arg(short, long)]
        q: Option<String>,

        /// Raw boolean query
        #[arg(short, long)]
        bq: Option<String>,

        #[arg(long)]
        size: Option<usize>,

        #[arg(long)]
        start: Option<usize>,

        #[arg(long)]
        rank: Option<String>,

        /// Comma-separated list of fields to return
        #[arg(long)]
        return_fields: Option<String>,

        /// Comma-separated list of fields to facet on
        #[arg(long)]
        facet: Option<String>,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::PostSdf { source } => {
            println!("Processing: {}", source.display());
            let batch = std::fs::read(&source)?;

            let response = client
                .post(format!("{}/2011-02-01/documents/batch", cli.endpoint))
                .header(HOST, &cli.domain_host)
                .header("content-type", "application/json")
                .body(batch)
                .send()
                .await?;

            let result: BatchResult = response.json().await?;
            match result.status {
                BatchStatus::Success => {
                    println!("Status: success");
                    println!("Added: {}", result.adds);
                    println!("Deleted: {}", result.deletes);
                }
                BatchStatus::Error => {
                    println!("Validation failed.");
                    for error in &result.errors {
                        println!("{}", error.message);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Search {
            q,
            bq,
            size,
            start,
            rank,
            return_fields,
            facet,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(q) = q {
                query.push(("q", q));
            }
            if let Some(bq) = bq {
                query.push(("bq", bq));
            }
            if let Some(size) = size {
                query.push(("size", size.to_string()));
            }
            if let Some(start) = start {
                query.push(("start", start.to_string()));
            }
            if let Some(rank) = rank {
                query.push(("rank", rank));
            }
            if let Some(return_fields) = return_fields {
                query.push(("return-fields", return_fields));
            }
            if let Some(facet) = facet {
                query.push(("facet", facet));
            }

            let response = client
                .get(format!("{}/2011-02-01/search", cli.endpoint))
                .header(HOST, &cli.domain_host)
                .query(&query)
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
