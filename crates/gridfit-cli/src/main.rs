use clap::{Parser, Subcommand};

mod commands;
mod report;

#[derive(Parser)]
#[command(
    name = "gridfit",
    about = "gridfit — pack services onto cluster nodes by CPU and memory",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to gridfit.toml (default: ./gridfit.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedulable capacity snapshot
    Snapshot {
        /// Read node metrics from a NodeMetricsList JSON file instead of
        /// the configured source
        #[arg(short, long)]
        metrics: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Allocate services onto the capacity snapshot.
    ///
    /// Services are read from [[services]] in gridfit.toml, or from a JSON
    /// array given with --services.
    Allocate {
        #[arg(short, long)]
        metrics: Option<String>,
        /// JSON file with an array of {id, required_cpu, required_memory}
        #[arg(short, long)]
        services: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a gridfit.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridfit=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot { metrics, format } => {
            commands::snapshot::snapshot(cli.config.as_deref(), metrics.as_deref(), &format)
        }
        Commands::Allocate { metrics, services, format } => commands::allocate::allocate(
            cli.config.as_deref(),
            metrics.as_deref(),
            services.as_deref(),
            &format,
        ),
        Commands::Init { path } => commands::init::init(&path),
    }
}
