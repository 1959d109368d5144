use clap::{Parser, Subcommand};
use std::process;

use taskbot_bot::BotConfig;
use taskbot_cli::{bot, logging, server, ServerConfig};

#[derive(Parser)]
#[command(name = "taskbot")]
#[command(about = "Taskbot - task store API and chat bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the task REST API
    Serve {
        #[arg(long, help = "Address to bind (overrides TASKBOT_HOST)")]
        host: Option<String>,
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
        #[arg(long, help = "SQLite URL or \"memory\" (overrides DATABASE_URL)")]
        database_url: Option<String>,
    },
    /// Run the Telegram bot against a running task API
    Bot,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            database_url,
        } => {
            let config = ServerConfig::from_env()?.with_overrides(host, port, database_url)?;
            server::serve(&config).await
        }
        Commands::Bot => bot::run(BotConfig::from_env()?).await,
    }
}
