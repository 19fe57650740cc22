//! Flecha Programming Language - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use flecha::frontend::printer::TreePrinter;
use flecha::util::config::{load_config, FlechaConfig};
use flecha::util::logger::{self, LogLevel};
use flecha::{check_file, parse_file, tokenize_file, NAME, VERSION};

/// Front end for the Flecha language
#[derive(Parser, Debug)]
#[command(name = "flecha")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree of a source file
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a source file and bind storage for its allocations
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn load(path: Option<&Path>) -> Result<FlechaConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(FlechaConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load(args.config.as_deref())?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log.level
    };
    logger::init_with_level(level);

    match args.command {
        Commands::Tokens { file } => {
            for token in tokenize_file(&file)? {
                println!(
                    "{}:{}\t{:?}\t{:?}",
                    token.line(),
                    token.column(),
                    token.kind,
                    token.lexeme
                );
            }
        }
        Commands::Parse { file } => {
            let program = parse_file(&file)?;
            print!("{}", TreePrinter::print(&program));
        }
        Commands::Check { file } => {
            let bindings = check_file(&file, &config)?;
            for binding in &bindings {
                println!(
                    "{} {}: {} bytes at {}",
                    binding.type_name, binding.variable, binding.size, binding.address
                );
            }
            eprintln!("Check passed!");
        }
    }

    Ok(())
}
