//! estate-search MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements three tools:
//! - `search(query, facets)` - Search properties by text and facets
//! - `show(id)` - Detail card of one property
//! - `tags(query)` - Distinct fields matching a query

use anyhow::Result;
use clap::Parser;
use estate_search::cli::{self, Cli, Commands};
use estate_search::config::{self, Config};
use estate_search::error::AppError;
use estate_search::search::SearchIndex;
use estate_search::{data, mcp, tools};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let config = load_config_or_default();

    let result = match (cli.command, load_index()) {
        (None, _) => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
        (Some(_), Err(e)) => Err(e),
        (Some(Commands::Search(args)), Ok(index)) => execute_search_cli(args, index, config).await,
        (Some(Commands::Show(args)), Ok(index)) => execute_show_cli(args, index).await,
        (Some(Commands::Tags(args)), Ok(index)) => execute_tags_cli(args, index, config).await,
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute search command in CLI mode
async fn execute_search_cli(
    args: cli::SearchArgs,
    index: Arc<SearchIndex>,
    config: Config,
) -> Result<String, AppError> {
    let result =
        tools::run_with_timeout(move || tools::search::execute_search(&args, &index, &config)).await?;
    Ok(result.first_text().to_string())
}

/// Execute show command in CLI mode
async fn execute_show_cli(args: cli::ShowArgs, index: Arc<SearchIndex>) -> Result<String, AppError> {
    let result = tools::run_with_timeout(move || tools::show::execute_show(&args, &index)).await?;
    Ok(result.first_text().to_string())
}

/// Execute tags command in CLI mode
async fn execute_tags_cli(
    args: cli::TagsArgs,
    index: Arc<SearchIndex>,
    config: Config,
) -> Result<String, AppError> {
    let result =
        tools::run_with_timeout(move || tools::tags::execute_tags(&args, &index, &config)).await?;
    Ok(result.first_text().to_string())
}

/// Parse the bundled collection once for the whole process
fn load_index() -> Result<Arc<SearchIndex>, AppError> {
    let index = data::default_index()?;
    info!("Search index ready: {} properties", index.len());
    Ok(Arc::new(index))
}

/// Settings from the config file; an unreadable file is reported and ignored
fn load_config_or_default() -> Config {
    match config::load_config().map_err(|e| AppError::Config(format!("{:#}", e))) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) => 1, // Invalid arguments or usage error
        AppError::NotFound(_) => 3,
        AppError::Timeout(_) => 4,
        AppError::Dataset(_) | AppError::Config(_) | AppError::Internal(_) => 5,
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Initialize logging from RUST_LOG; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting estate-search MCP Server");

    let index = match load_index() {
        Ok(index) => index,
        Err(e) => {
            error!("{}", e);
            std::process::exit(get_exit_code(&e));
        }
    };

    mcp::handle_stdio(index, load_config_or_default()).await?;

    Ok(())
}
