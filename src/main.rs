//! `rddl` command-line entry point.

mod commands;
mod diagnostics;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use rddl::config::Config;
use rddl::{Error, RddlParser, ResourceField};

use crate::commands::Format;

/// Top-level arguments shared by every subcommand.
#[derive(Parser)]
#[command(name = "rddl", version, about = "Extract resource directory entries from RDDL documents")]
struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Prefix label of RDDL elements (default from .rddl.toml, else `rddl`).
    #[arg(long, global = true, value_name = "PREFIX")]
    rddl_prefix: Option<String>,
    /// Raise log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Prefix label of XLink attributes (default from .rddl.toml, else `xlink`).
    #[arg(long, global = true, value_name = "PREFIX")]
    xlink_prefix: Option<String>,
    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands, one per query.
#[derive(Subcommand)]
enum Commands {
    /// Print the resource with the given identifier
    Get {
        /// Document path, or `-` for stdin
        input: String,
        /// Value of the resource's `id` attribute
        id: String,
    },
    /// Print resources in the given language
    Lang {
        /// Document path, or `-` for stdin
        input: String,
        /// Language tag, compared exactly
        tag: String,
    },
    /// Print every resource in a document
    List {
        /// Document path, or `-` for stdin
        input: String,
    },
    /// Print resources of the given nature (xlink:role)
    Nature {
        /// Document path, or `-` for stdin
        input: String,
        /// Nature URI, compared exactly
        uri: String,
    },
    /// Print resources with the given purpose (xlink:arcrole)
    Purpose {
        /// Document path, or `-` for stdin
        input: String,
        /// Purpose URI, compared exactly
        uri: String,
    },
    /// Parse every document under a directory
    Scan {
        /// Directory to walk
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Parse arguments, set up logging, and map failures to exit codes.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    return match run(cli) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            return exit_code_for(&e);
        },
    };
}

/// Load config, build the parser, and dispatch the subcommand.
///
/// # Errors
///
/// Returns errors from config loading or the command itself.
fn run(cli: Cli) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?.with_prefixes(cli.rddl_prefix, cli.xlink_prefix);
    let parser = RddlParser::new(config.namespaces());
    let format = if cli.json { Format::Json } else { Format::Text };

    match cli.command {
        Commands::Get { input, id } => commands::get(&parser, &input, &id, format)?,
        Commands::Lang { input, tag } => {
            commands::filter(&parser, &input, ResourceField::Lang, &tag, format)?;
        },
        Commands::List { input } => commands::list(&parser, &input, format)?,
        Commands::Nature { input, uri } => {
            commands::filter(&parser, &input, ResourceField::Role, &uri, format)?;
        },
        Commands::Purpose { input, uri } => {
            commands::filter(&parser, &input, ResourceField::Arcrole, &uri, format)?;
        },
        Commands::Scan { dir } => return commands::scan(&parser, &config, &dir, format),
    }

    return Ok(ExitCode::SUCCESS);
}

/// Exit code priority: unknown identifier (2) > any other failure (1).
fn exit_code_for(e: &Error) -> ExitCode {
    return match e {
        Error::IdentifierNotFound { .. } => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    };
}
