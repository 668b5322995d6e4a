use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use autobump_github::config::{self, RunConfig};
use autobump_github::definition::YamlPatcher;
use autobump_github::report::TracingReporter;
use autobump_github::runner::Runner;
use autobump_github::upstream::GitHubSource;

#[derive(Parser)]
#[command(name = "autobump-github")]
#[command(version, about = "Bump luet package definitions to the latest upstream GitHub version")]
struct Cli {
    /// Root of the package tree
    #[arg(long, env = "TREE_DIR")]
    tree_dir: Option<PathBuf>,

    /// GitHub API token
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Abort with a non-zero status on the first package error
    #[arg(
        long,
        env = "FAIL_ON_ERROR",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = config::parse_flag
    )]
    fail_on_error: bool,

    /// Base URL of the GitHub API
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Write JSON logs to this file instead of stdout
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    };

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", log_file.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

async fn run(config: RunConfig, tree_dir: PathBuf) -> anyhow::Result<()> {
    let source = GitHubSource::new(&config.api_url, config.token.clone())?;
    let today = chrono::Local::now().date_naive();

    let writer = YamlPatcher;
    let reporter = TracingReporter;

    info!("Checking tree {}", tree_dir.display());
    let runner = Runner::new(&source, &writer, &reporter, today, config.fail_on_error);
    runner.run(&tree_dir).await?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref())?;

    let config = RunConfig::new(cli.tree_dir, cli.token, cli.fail_on_error, cli.api_url);

    let Some(tree_dir) = config.tree_dir.clone() else {
        error!("TREE_DIR is not set");
        if config.fail_on_error {
            anyhow::bail!("TREE_DIR is not set");
        }
        return Ok(());
    };

    // Packages are processed strictly one after another.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(config, tree_dir))
}
