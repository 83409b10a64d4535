mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// KAREL and TP language tools.
#[derive(Parser)]
#[command(name = "robolang", version, about = "KAREL and TP language tools")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a KAREL file made of TYPE and CONST sections
    Parse {
        /// Path to the KAREL source file
        file: PathBuf,
    },

    /// Resolve the label referenced on a line of a parsed TP program
    Hover {
        /// Path to the TP program tree, serialized as JSON
        program: PathBuf,
        /// 0-based cursor line
        #[arg(long)]
        line: u32,
        /// 0-based cursor character
        #[arg(long, default_value = "0")]
        character: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => {
            commands::parse::cmd_parse(&file, cli.output, cli.quiet);
        }
        Commands::Hover {
            program,
            line,
            character,
        } => {
            commands::hover::cmd_hover(&program, line, character, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
