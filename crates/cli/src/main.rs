mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// MT103 to JSON converter.
#[derive(Parser)]
#[command(name = "mt103", version, about = "MT103 to JSON converter")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an MT103 message file (or every .txt file in a directory)
    /// to JSON
    Convert {
        /// Path to an MT103 .txt file, or a directory for batch mode
        path: PathBuf,
        /// Output file (single-file mode) or output directory (batch
        /// mode); defaults to sibling paths with a .json extension
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate synthetic MT103 sample messages for testing
    Generate {
        /// Directory to write sample .txt files into
        dir: PathBuf,
        /// Number of samples to generate
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Emit only the mandatory fields
        #[arg(long)]
        minimal: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { path, output } => {
            commands::convert::cmd_convert(&path, output.as_deref(), cli.quiet)
        }
        Commands::Generate {
            dir,
            count,
            seed,
            minimal,
        } => commands::generate::cmd_generate(&dir, count, seed, minimal, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
