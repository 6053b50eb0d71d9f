use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_fetch::{PageFetcher, pull_all_with};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod report;

use config::{Config, OutputFormat};
use report::Report;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Pull paginated ledger transactions and report running balances"
)]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pull every page, then print the total and the running daily balance (default)
    Pull(PullArgs),

    /// Write a default config file if none exists
    InitConfig,
}

#[derive(Args, Debug, Default)]
struct PullArgs {
    /// Page URL template; `{page}` is replaced with the page number
    #[arg(long)]
    url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Tries per page on timeout or connection failure
    #[arg(long)]
    max_attempts: Option<u32>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl PullArgs {
    fn apply(self, cfg: &mut Config) {
        if let Some(url) = self.url {
            cfg.api.url_template = url;
        }
        if let Some(secs) = self.timeout_secs {
            cfg.api.timeout_secs = secs;
        }
        if let Some(n) = self.max_attempts {
            cfg.api.max_attempts = n;
        }
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Pull(PullArgs::default())) {
        Command::Pull(args) => pull(args, cli.config.as_deref()).await?,
        Command::InitConfig => {
            let path = match cli.config {
                Some(p) => p,
                None => config::default_config_path()?,
            };
            config::init_config(&path)?
        }
    }

    Ok(())
}

async fn pull(args: PullArgs, config_path: Option<&Path>) -> Result<()> {
    let mut cfg = config::load_effective_config(config_path)?;
    args.apply(&mut cfg);
    let format = cfg.output.format;

    let fetcher = PageFetcher::new(cfg.fetch_config()).context("set up page fetcher")?;

    let records = pull_all_with(&fetcher, |p| {
        tracing::info!(dropped = p.dropped, "read page {}", p.page_number);
        if format == OutputFormat::Text {
            println!("read page {} with {} records", p.page_number, p.records);
        }
    })
    .await
    .context("pull transactions")?;

    let report = Report::build(&records);
    match format {
        OutputFormat::Text => {
            println!("done reading all records");
            print!("{}", report.render_text());
        }
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}
