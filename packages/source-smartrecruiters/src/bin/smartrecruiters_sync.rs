// Run a SmartRecruiters sync from the command line and print the nodes a
// host would receive.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smartrecruiters_client::SmartRecruitersClient;
use source_smartrecruiters::{
    config::{parse_param, SourceOptions},
    declare_schema, source_nodes, MemoryGraph, SCHEMA,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smartrecruiters-sync", about = "SmartRecruiters source plugin runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch departments and job posts, print the nodes as JSON lines
    Sync {
        /// Company identifier (defaults to SMARTRECRUITERS_COMPANY_IDENTIFIER)
        #[arg(long)]
        company: Option<String>,

        /// Replace summary postings with their full records
        #[arg(long)]
        fetch_details: bool,

        /// Query parameter for the postings listing, repeatable (key=value)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Print the GraphQL type definitions
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,source_smartrecruiters=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            println!("{}", SCHEMA.trim());
        }
        Command::Sync {
            company,
            fetch_details,
            params,
            base_url,
        } => {
            let mut options = SourceOptions::from_env_with_company(company)
                .context("Failed to load configuration")?;
            if fetch_details {
                options.fetch_details = true;
            }
            if !params.is_empty() {
                options = options.with_job_posts(params.into_iter().collect());
            }

            let mut client = SmartRecruitersClient::new();
            if let Some(base_url) = base_url {
                client = client.with_base_url(base_url);
            }

            let graph = MemoryGraph::new();
            declare_schema(&graph).context("Failed to declare schema")?;
            let report = source_nodes(&client, &graph, &options)
                .await
                .context("Failed to fetch data from SmartRecruiters")?;

            for node in graph.nodes() {
                println!("{}", serde_json::to_string(&node)?);
            }
            tracing::info!(
                departments = report.departments,
                job_posts = report.job_posts,
                unmatched = report.unmatched,
                "Sync complete"
            );
        }
    }

    Ok(())
}
