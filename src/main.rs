use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use appcheck::catalog::{Node, local, remote};
use appcheck::config::{GITHUB_API_BASE, HTTP_TIMEOUT_SECS, USER_AGENT};
use appcheck::github::GithubClient;
use appcheck::image::DockerCli;
use appcheck::notify::LogAnnouncer;
use appcheck::{report, updater};

#[derive(Parser)]
#[command(name = "appcheck")]
#[command(version, about = "Check home-server apps for upstream updates")]
struct Cli {
    /// GitHub access token; without one the API rate limit is hit quickly
    #[arg(short, long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Which node distribution's public catalog to check
    #[arg(short, long, default_value = "Citadel")]
    node: Node,

    /// Local app directory; updates found for its apps are applied in place
    #[arg(short, long)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether all apps are up to date
    Appcheck,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so stdout stays a clean report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Appcheck => appcheck_command(cli).await,
    }
}

async fn appcheck_command(cli: Cli) -> anyhow::Result<()> {
    let github = GithubClient::new(GITHUB_API_BASE, cli.token.clone());

    let records = match &cli.directory {
        Some(dir) => local::scan_app_dir(dir)?,
        None => {
            let client = reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()?;
            remote::fetch_catalog(&client, &cli.node.catalog_url()).await?
        }
    };

    let results = updater::scan(
        &github,
        &DockerCli,
        &LogAnnouncer,
        &records,
        cli.directory.as_deref(),
    )
    .await;

    let rows = updater::report_rows(&results);
    println!("{}", report::render_markdown(&cli.node.to_string(), &rows));
    Ok(())
}
