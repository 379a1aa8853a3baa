use clap::{Args, Parser, Subcommand};
use logscope::{
    discover_link, fetch_logs, fetch_status, render, ErrorEnvelope, ToolRequest, ToolResult,
};
use logscope_backends::SearchService;
use logscope_core::config::Config;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "logscope",
    version,
    about = "Search logs through Kibana or Elasticsearch and build Discover links"
)]
struct Cli {
    /// Read configuration from this file instead of
    /// $XDG_CONFIG_HOME/logscope/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level to stderr (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search logs and print the result as JSON.
    Search(SearchArgs),
    /// Fetch the Kibana status document to verify connectivity.
    Status,
    /// Print a shareable Discover URL for a search without running it.
    Link(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Index pattern or data view, e.g. "logs-*".
    index_pattern: String,

    /// Start of the window; absolute timestamp or date math ("now-1h").
    #[arg(long)]
    from: Option<String>,

    /// End of the window.
    #[arg(long)]
    to: Option<String>,

    /// KQL / Lucene query, e.g. 'log.level:ERROR'.
    #[arg(short, long)]
    query: Option<String>,

    /// Comma-separated fields to return.
    #[arg(long)]
    fields: Option<String>,

    /// Maximum number of records.
    #[arg(long)]
    size: Option<usize>,

    #[arg(long)]
    sort_field: Option<String>,

    /// "asc" or "desc".
    #[arg(long)]
    sort_order: Option<String>,
}

impl From<SearchArgs> for ToolRequest {
    fn from(args: SearchArgs) -> Self {
        ToolRequest {
            index_pattern: args.index_pattern,
            time_from: args.from,
            time_to: args.to,
            query: args.query,
            fields: args.fields,
            size: args.size,
            sort_field: args.sort_field,
            sort_order: args.sort_order,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let service = match build_service(cli.config.as_deref()) {
        Ok(service) => service,
        Err(envelope) => {
            println!("{}", render(&Err(envelope)));
            return ExitCode::FAILURE;
        }
    };

    let result: ToolResult = match cli.command {
        Command::Search(args) => fetch_logs(&service, &args.into()).await,
        Command::Status => fetch_status(&service).await,
        Command::Link(args) => discover_link(&service, &args.into()),
    };

    println!("{}", render(&result));
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_service(path: Option<&Path>) -> Result<SearchService, ErrorEnvelope> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| ErrorEnvelope::configuration(&e))?;
    tracing::debug!(
        kibana = config.kibana_url().unwrap_or("<unset>"),
        elastic_hosts = config.elastic.hosts().len(),
        "configuration loaded"
    );
    SearchService::new(config).map_err(|e| ErrorEnvelope::from(&e))
}
