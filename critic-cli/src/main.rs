//! Critic CLI - Command line interface for the Critic review service
//!
//! Runs the HTTP server and talks to it from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use critic_core::{CliOverrides, Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ChatArgs, CriticClient, DeleteArgs, HistoryArgs, ReviewArgs, ServeArgs};

/// Critic: AI code review with a searchable history
#[derive(Parser, Debug)]
#[command(name = "critic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Address the server listens on (overrides config and env)
    #[arg(long, global = true, env = "CRITIC_BIND")]
    bind: Option<String>,

    /// Gemini model to use (overrides config and env)
    #[arg(long, global = true, env = "CRITIC_MODEL")]
    model: Option<String>,

    /// Review store connection string (overrides config and env)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of a running Critic server
    #[arg(
        long,
        global = true,
        env = "CRITIC_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Run the HTTP API and web UI
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// Review a file, stdin or GitHub URL
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Interactive review session
    Chat(ChatArgs),

    /// List past reviews
    #[command(visible_alias = "h")]
    History(HistoryArgs),

    /// Delete a past review
    Delete(DeleteArgs),

    /// Show current configuration
    Config {
        /// Create an empty secrets file for the Gemini API key
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(CliOverrides {
        bind: cli.bind.clone(),
        model: cli.model.clone(),
        database_url: cli.database_url.clone(),
    })?;

    if cli.verbose {
        tracing::info!(
            bind = %config.server.bind,
            model = %config.ai.model,
            database = %config.database.url,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("critic {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Review(args)) => {
            let client = CriticClient::new(&cli.server)?;
            args.execute(&client).await?;
        }
        Some(Commands::Chat(args)) => {
            let client = CriticClient::new(&cli.server)?;
            args.execute(&client).await?;
        }
        Some(Commands::History(args)) => {
            let client = CriticClient::new(&cli.server)?;
            args.execute(&client).await?;
        }
        Some(Commands::Delete(args)) => {
            let client = CriticClient::new(&cli.server)?;
            args.execute(&client).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            if init_secrets {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Add your Gemini API key there, or set GEMINI_API_KEY.");
            } else {
                print_config(&config, &cli.server)?;
            }
        }
        None => {
            println!("Critic - AI code review with a searchable history");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config, server: &str) -> anyhow::Result<()> {
    println!("Critic Configuration");
    println!("====================");
    println!();
    println!("Server Settings:");
    println!("  bind: {}", config.server.bind);
    println!();
    println!("AI Settings:");
    println!("  model: {}", config.ai.model);
    println!("  base_url: {}", config.ai.base_url);
    match config.ai.timeout {
        Some(timeout) => println!("  timeout: {:?}", timeout),
        None => println!("  timeout: (none)"),
    }
    println!();
    println!("GitHub Settings:");
    println!("  raw_base_url: {}", config.github.raw_base_url);
    println!();
    println!("Database Settings:");
    println!("  url: {}", config.database.url);
    println!("  max_connections: {}", config.database.max_connections);
    println!();
    println!("Client Settings:");
    println!("  server: {}", server);
    println!();

    let secrets = Secrets::load()?;
    println!(
        "Gemini API key: {}",
        if secrets.gemini_api_key().is_some() {
            "(set)"
        } else {
            "(missing - set GEMINI_API_KEY)"
        }
    );

    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "critic",
            "history",
            "--server",
            "http://review.local:8080",
            "--search",
            "unwrap",
        ])
        .unwrap();

        assert_eq!(cli.server, "http://review.local:8080");
        assert!(matches!(cli.command, Some(Commands::History(_))));
    }

    #[test]
    fn test_review_rejects_file_and_github_together() {
        let result = Cli::try_parse_from([
            "critic",
            "review",
            "main.rs",
            "--github",
            "https://github.com/owner/repo",
        ]);
        assert!(result.is_err());
    }
}
