//! # storyweave-ctl
//!
//! Command-line companion to the StoryWeave server.
//!
//! ```bash
//! # Render a widget description offline
//! storyweave-ctl render --input quiz.json --output-dir widgets/
//!
//! # Generate against a running server, then edit the saved response
//! storyweave-ctl generate --prompt "A BMI calculator" > bmi.json
//! storyweave-ctl edit --widget bmi.json --instruction "Add an age field"
//! ```

mod cli_config;
mod client;
mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli_config::CliConfig;
use client::ServerClient;
use error::CtlResult;

#[derive(Debug, Parser)]
#[command(name = "storyweave-ctl", version, about, styles = output::clap_styles())]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a widget JSON file into a React component and embed snippet
    Render(RenderArgs),
    /// List example prompts
    Examples,
    /// Generate a widget on a running server and print the response
    Generate {
        /// Plain-English description of the widget
        #[arg(short, long)]
        prompt: String,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Edit a widget on a running server and print the response
    Edit {
        /// Saved server response (or bare widget description) to edit
        #[arg(short, long)]
        widget: PathBuf,

        /// What to change
        #[arg(short, long)]
        instruction: String,

        /// Override the widget id taken from the saved response
        #[arg(long)]
        widget_id: Option<String>,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Check a running server's health
    Health {
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    /// Widget description JSON, or a saved server response
    #[arg(short, long)]
    pub input: PathBuf,

    /// Id used in the embed snippet (default: the saved response's id, or "preview")
    #[arg(long)]
    pub widget_id: Option<String>,

    /// CDN root the embed script is loaded from
    #[arg(long)]
    pub cdn_base: Option<String>,

    /// Write `<Component>.jsx` and `embed.html` here instead of printing them
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ServerArgs {
    /// Server base URL
    #[arg(long, env = "STORYWEAVE_SERVER_URL")]
    server: Option<String>,
}

impl ServerArgs {
    fn client(&self, config: &CliConfig) -> CtlResult<ServerClient> {
        let base_url = self.server.as_deref().unwrap_or(&config.server_url);
        ServerClient::new(base_url, Duration::from_secs(config.timeout_seconds))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli_config::load_cli_config();
    if let Err(e) = run(cli.command, &config).await {
        output::error(e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &CliConfig) -> CtlResult<()> {
    match command {
        Commands::Render(args) => commands::handle_render_command(args, config),
        Commands::Examples => {
            commands::handle_examples_command();
            Ok(())
        }
        Commands::Generate { prompt, server } => {
            commands::handle_generate_command(&prompt, &server.client(config)?).await
        }
        Commands::Edit {
            widget,
            instruction,
            widget_id,
            server,
        } => {
            commands::handle_edit_command(&widget, &instruction, widget_id, &server.client(config)?)
                .await
        }
        Commands::Health { server } => commands::handle_health_command(&server.client(config)?).await,
    }
}

/// Logs go to stderr so stdout stays clean for generated code and JSON.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "storyweave=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
