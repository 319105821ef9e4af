mod cmd;
mod output;

use clap::{Args, Parser, Subcommand};
use logbook_core::{Mode, Roadmap};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "logbook",
    about = "Live roadmap dashboard for logbook feature files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to find the feature files.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Treat PATH as a workspace config listing several projects
    #[arg(long)]
    workspace: bool,

    /// Feature file (default: .claude/system/features.json), or the workspace
    /// config with --workspace (default: .claude/logbook.local.md)
    path: Option<PathBuf>,
}

impl SourceArgs {
    fn roadmap(&self) -> Roadmap {
        Roadmap::resolve(Mode::from_workspace_flag(self.workspace), self.path.as_deref())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the live roadmap dashboard
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "0")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Print the aggregated roadmap once
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the resolved feature sources
    Sources {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve {
            source,
            port,
            no_open,
        } => cmd::serve::run(source.roadmap(), port, no_open),
        Commands::Snapshot { source } => cmd::snapshot::run(&source.roadmap(), cli.json),
        Commands::Sources { source } => cmd::sources::run(&source.roadmap(), cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
