//! Crawler-Control main entry point
//!
//! This is the command-line interface for operating a crawler service.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crawler_control::config::{load_profile, ClientConfig, Profile};
use crawler_control::model::{PatchOperation, DEFAULT_QUEUE, DEFAULT_REQUEUE_QUEUE};
use crawler_control::{CrawlRequest, CrawlerClient};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Crawler-Control: operate a remote crawler service
///
/// Reads and patches the crawler configuration, rotates access tokens,
/// inspects and edits request queues, and manages deadletters.
#[derive(Parser, Debug)]
#[command(name = "crawler-ctl")]
#[command(version)]
#[command(about = "Operate a remote crawler service", long_about = None)]
struct Cli {
    /// Base URL of the crawler service [env: CRAWLER_SERVICE_URL]
    #[arg(long, global = true)]
    url: Option<String>,

    /// Auth token sent as X-token [env: CRAWLER_SERVICE_AUTH_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// TOML profile with a [service] table
    #[arg(long, global = true, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read or patch the crawler configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Read or replace the accepted token set
    #[command(subcommand)]
    Tokens(TokensCommand),

    /// Inspect and edit request queues
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Manage deadlettered requests
    #[command(subcommand)]
    Deadletters(DeadletterCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the configuration document
    Get,

    /// Apply a JSON array of patch operations read from FILE ("-" for stdin)
    Patch {
        #[arg(value_name = "FILE")]
        patches: PathBuf,
    },

    /// Set the desired crawler count (negative values become 0)
    Count {
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Replace the list of organizations to crawl
    Orgs {
        #[arg(required = true)]
        orgs: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TokensCommand {
    /// Print the current token set
    Get,

    /// Replace the token set
    Set {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct QueueTarget {
    /// Queue name
    #[arg(default_value = DEFAULT_QUEUE)]
    queue: String,
}

#[derive(Subcommand, Debug)]
enum QueueCommand {
    /// Append requests read from FILE ("-" for stdin); a single object or an array
    Push {
        #[arg(value_name = "FILE")]
        requests: PathBuf,

        /// Queue name
        #[arg(long, default_value = DEFAULT_QUEUE)]
        queue: String,
    },

    /// Show requests at the head of a queue without removing them
    Peek {
        #[command(flatten)]
        target: QueueTarget,

        /// Number of requests
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// Remove requests from the head of a queue
    Delete {
        #[command(flatten)]
        target: QueueTarget,

        /// Number of requests
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// Remove every request from a queue
    Flush {
        #[command(flatten)]
        target: QueueTarget,
    },

    /// Print queue statistics
    Info {
        #[command(flatten)]
        target: QueueTarget,
    },
}

#[derive(Subcommand, Debug)]
enum DeadletterCommand {
    /// List all deadletters
    List,

    /// Print the number of deadletters
    Count,

    /// Print one deadletter
    Get { urn: String },

    /// Permanently delete a deadletter
    Delete { urn: String },

    /// Move a deadletter back into a live queue
    Requeue {
        urn: String,

        /// Destination queue
        #[arg(long, default_value = DEFAULT_REQUEUE_QUEUE)]
        queue: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(cli.profile.as_deref(), cli.url, cli.token)?;
    tracing::info!(
        "Using crawler service at {} (token {})",
        config.base_url,
        config.token_fingerprint()
    );

    let client = CrawlerClient::new(&config)?;

    match cli.command {
        Command::Config(command) => handle_config(&client, command).await,
        Command::Tokens(command) => handle_tokens(&client, command).await,
        Command::Queue(command) => handle_queue(&client, command).await,
        Command::Deadletters(command) => handle_deadletters(&client, command).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout stays clean JSON.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawler_control=warn,crawler_ctl=warn"),
            1 => EnvFilter::new("crawler_control=info,crawler_ctl=info,warn"),
            2 => EnvFilter::new("crawler_control=debug,crawler_ctl=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves connection settings: flags, then profile, then environment, then defaults
fn resolve_config(
    profile: Option<&Path>,
    url: Option<String>,
    token: Option<String>,
) -> anyhow::Result<ClientConfig> {
    let profile = match profile {
        Some(path) => load_profile(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => Profile::default(),
    };

    let config = ClientConfig::from_profile(profile, url, token);
    config.validate().context("Invalid client configuration")?;
    Ok(config)
}

async fn handle_config(client: &CrawlerClient, command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Get => print_json(&client.get_configuration().await?),
        ConfigCommand::Patch { patches } => {
            let patches: Vec<PatchOperation> = serde_json::from_value(read_json(&patches)?)
                .context("Patch file must be a JSON array of {op, path, value} objects")?;
            print_json(&client.configure_crawler(&patches).await?)
        }
        ConfigCommand::Count { count } => print_json(&client.configure_count(count).await?),
        ConfigCommand::Orgs { orgs } => print_json(&client.configure_orgs(&orgs).await?),
    }
}

async fn handle_tokens(client: &CrawlerClient, command: TokensCommand) -> anyhow::Result<()> {
    match command {
        TokensCommand::Get => print_json(&client.get_tokens().await?),
        TokensCommand::Set { tokens } => print_json(&client.set_tokens(&tokens).await?),
    }
}

async fn handle_queue(client: &CrawlerClient, command: QueueCommand) -> anyhow::Result<()> {
    match command {
        QueueCommand::Push { requests, queue } => {
            let requests = match read_json(&requests)? {
                Value::Array(items) => items.into_iter().map(CrawlRequest::from).collect(),
                Value::Object(item) => vec![CrawlRequest::from(Value::Object(item))],
                other => bail!("Expected a request object or an array of them, got {}", other),
            };
            print_json(&client.queue_requests(&requests, &queue).await?)
        }
        QueueCommand::Peek { target, count } => {
            print_json(&client.get_requests(&target.queue, count).await?)
        }
        QueueCommand::Delete { target, count } => {
            print_json(&client.delete_requests(&target.queue, count).await?)
        }
        QueueCommand::Flush { target } => print_json(&client.flush_queue(&target.queue).await?),
        QueueCommand::Info { target } => print_json(&client.get_info(&target.queue).await?),
    }
}

async fn handle_deadletters(
    client: &CrawlerClient,
    command: DeadletterCommand,
) -> anyhow::Result<()> {
    match command {
        DeadletterCommand::List => print_json(&client.list_deadletters().await?),
        DeadletterCommand::Count => print_json(&client.get_deadletter_count().await?),
        DeadletterCommand::Get { urn } => print_json(&client.get_deadletter(&urn).await?),
        DeadletterCommand::Delete { urn } => print_json(&client.delete_deadletter(&urn).await?),
        DeadletterCommand::Requeue { urn, queue } => {
            print_json(&client.requeue_deadletter(&urn, &queue).await?)
        }
    }
}

/// Reads a JSON document from a file, or from stdin when the path is "-"
fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
