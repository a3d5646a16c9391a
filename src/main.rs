//! souschef - Conversational Recipe Assistant
//!
//! Main entry point: HTTP server, single prompt, or interactive REPL.

use clap::Parser;
use souschef::core::answer_text;
use souschef::{AgentExecutor, Config, Repl};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// souschef - Conversational Recipe Assistant
#[derive(Parser, Debug)]
#[command(name = "souschef")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gemini model to use
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Maximum tool-calling loop iterations per message
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Run the HTTP server instead of the REPL
    #[arg(long)]
    serve: bool,

    /// Port for the HTTP server
    #[arg(long)]
    port: Option<u16>,

    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        println!("{}", Config::default_config_toml());
        return Ok(());
    }

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.gemini.model = model.clone();
    }

    if let Some(max_iterations) = args.max_iterations {
        config.agent.max_iterations = max_iterations;
    }

    if args.debug {
        config.agent.debug = true;
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Initialize logging
    let default_filter = if config.agent.debug {
        "souschef=debug,tower_http=debug"
    } else {
        "souschef=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // HTTP server mode
    if args.serve {
        souschef::server::serve(config).await?;
        return Ok(());
    }

    // Single prompt mode
    if let Some(prompt) = args.prompt {
        let mut agent = AgentExecutor::with_config(&config)?;
        let payload = agent.invoke(&prompt).await?;
        println!("{}", answer_text(&payload));
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(&config)?;
    repl.run().await?;

    Ok(())
}
