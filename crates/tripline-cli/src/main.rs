use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tripline-cli", version, about = "Tripline timeline CLI")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived layout of a trip as JSON
    Layout(commands::layout::LayoutArgs),
    /// Print the route links between stays
    Links(commands::links::LinksArgs),
    /// Apply the suggested gap/overlap repair to one stay
    Repair(commands::repair::RepairArgs),
    /// Replay a pointer gesture and print the emitted events
    Drag(commands::drag::DragArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Layout(args) => commands::layout::run(args),
        Commands::Links(args) => commands::links::run(args),
        Commands::Repair(args) => commands::repair::run(args),
        Commands::Drag(args) => commands::drag::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
