//! PlantNet MCP server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use plantnet::PlantNetClient;
use plantnet_mcp::config::resolve_api_key;
use plantnet_mcp::protocol::ProtocolHandler;
use plantnet_mcp::tools::ToolRegistry;
use plantnet_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "plantnet-mcp",
    about = "MCP server exposing PlantNet species identification as assistant tools",
    version
)]
struct Cli {
    /// PlantNet API key (overrides PLANTNET_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// PlantNet API key (overrides PLANTNET_API_KEY).
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve { api_key: None }) {
        Commands::Serve { api_key } => {
            let effective_key = api_key.or(cli.api_key);
            let api_key = resolve_api_key(effective_key.as_deref())?;
            let client = Arc::new(PlantNetClient::new(api_key)?);
            let handler = ProtocolHandler::new(client);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let capabilities = plantnet_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "plantnet-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
