use clap::Parser;
use dox::headless::{self, OutputFormat};
use dox_core::config::Config;
use dox_ols::OlsClient;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dox", about = "Disease Ontology eXplorer: search EFO and MONDO terms")]
struct Cli {
    /// Write debug logs to /tmp/dox-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Run a single search, print the results and exit instead of starting
    /// the TUI. An empty query prints the featured diseases.
    #[arg(long)]
    query: Option<String>,

    /// Output format for `--query`.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the OLS `select` endpoint from the config file.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dox-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dox debug log started, tail -f /tmp/dox-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config: falling back to defaults");
        Config::defaults()
    });
    if let Some(endpoint) = cli.endpoint {
        config.search.endpoint = endpoint;
    }

    let Some(query) = cli.query else {
        dox_tui::run(config)?;
        return Ok(ExitCode::SUCCESS);
    };

    let client = OlsClient::new(&config.search)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let mut stdout = std::io::stdout().lock();
    match runtime.block_on(headless::run(&client, &query, cli.format, &mut stdout)) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
