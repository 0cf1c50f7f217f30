//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use jsonify_core::TargetFormat;

/// JSONify CLI - Validate, format, convert, and scan JSON documents
///
/// A command-line tool for working with JSON: validation with AI-assisted
/// error explanation, formatting and minification, a collapsible tree view,
/// format conversion, secret scanning, and size statistics.
#[derive(Parser, Debug)]
#[command(
    name = "jsonify",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "JSONIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a JSON document and report its status
    Validate(ValidateArgs),

    /// Re-serialize a JSON document with 2-space indentation
    Format(TransformArgs),

    /// Re-serialize a JSON document with no whitespace
    Minify(TransformArgs),

    /// Render a collapsible tree view of a JSON document
    Tree(TreeArgs),

    /// Report size and token statistics for a JSON document
    Stats(StatsArgs),

    /// Convert a JSON document to YAML, XML, or TOML via the model service
    Convert(ConvertArgs),

    /// Scan a JSON document for likely secrets via the model service
    Scan(ScanArgs),

    /// Explain why a JSON document fails to parse via the model service
    Explain(ExplainArgs),

    /// Print the built-in sample document
    Sample(SampleArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,
}

/// Arguments for the format and minify commands
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the tree command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,

    /// Expand this many nesting levels (default: first two levels)
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,

    /// Target format
    #[arg(short, long, value_enum)]
    pub to: TargetFormatArg,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,

    /// Apply the redaction to the document and emit the redacted text
    #[arg(long)]
    pub apply: bool,

    /// Output file path for the redacted document (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the explain command
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Path to the JSON document, or '-' for stdin
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,

    /// Apply the suggested fix and emit the updated document
    #[arg(long)]
    pub apply: bool,

    /// Output file path for the fixed document (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the sample command
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the default configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Conversion target, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetFormatArg {
    Yaml,
    Xml,
    Toml,
}

impl From<TargetFormatArg> for TargetFormat {
    fn from(arg: TargetFormatArg) -> Self {
        match arg {
            TargetFormatArg::Yaml => TargetFormat::Yaml,
            TargetFormatArg::Xml => TargetFormat::Xml,
            TargetFormatArg::Toml => TargetFormat::Toml,
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity level
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        if self.no_color || std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_parsing() {
        let cli = Cli::parse_from(["jsonify", "validate", "doc.json"]);
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.input, PathBuf::from("doc.json")),
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_convert_requires_target() {
        let result = Cli::try_parse_from(["jsonify", "convert", "doc.json"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["jsonify", "convert", "doc.json", "--to", "yaml"]);
        match cli.command {
            Commands::Convert(args) => assert_eq!(args.to, TargetFormatArg::Yaml),
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::parse_from(["jsonify", "-vv", "validate", "doc.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["jsonify", "--quiet", "validate", "doc.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["jsonify", "-q", "-v", "validate", "doc.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_format_conversion() {
        assert_eq!(TargetFormat::from(TargetFormatArg::Xml), TargetFormat::Xml);
        assert_eq!(TargetFormat::from(TargetFormatArg::Toml), TargetFormat::Toml);
    }
}
