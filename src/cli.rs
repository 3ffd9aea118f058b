use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gavel")]
#[command(author, version)]
#[command(about = "A linter for proposal documents with structured key/value preambles")]
#[command(
    long_about = "Gavel is a CLI linter for Markdown proposal documents that carry a key/value \
    preamble between `---` delimiters. It checks the preamble against a configurable rule set \
    (required headers, ordering, value formats, cross-proposal constraints) and prints \
    compiler-style diagnostics with source snippets."
)]
#[command(after_help = "\
EXAMPLES:

    # Lint a single proposal
    gavel lint proposal-1.md

    # Lint every proposal in a directory
    gavel lint proposals/

    # Machine-readable output
    gavel lint --format json proposal-1.md

    # Retune rule severities for one run
    gavel lint -A preamble-re-title -W preamble-requires-status proposal-1.md

    # List the registered rules
    gavel rules

CONFIGURATION:

Gavel looks for configuration files in this order:
  1. Explicit --config path
  2. .gavel.toml or gavel.toml in the input's directory and its parents
  3. ~/.config/gavel/config.toml (XDG)
  4. Built-in defaults

Example .gavel.toml:

    warn = [\"preamble-requires-status\"]

    [default_lints.proposal-banana]
    kind = \"preamble-regex\"
    header = \"title\"
    mode = \"excludes\"
    pattern = \"[Bb]anana\"
    message = \"titles must not reference bananas\"

For more information, visit: https://github.com/gavel-lint/gavel")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, gavel will search \
        for .gavel.toml or gavel.toml in the input's directory and its parents, then fall back \
        to ~/.config/gavel/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check proposal documents against the rule set
    #[command(
        long_about = "Check one or more proposal documents against the configured rule set. \
        Every finding is printed as a compiler-style diagnostic; directories are searched for \
        .md files. Sibling files named proposal-N.md are loaded automatically so rules that \
        follow `requires` references can see them."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Lint a single proposal
    gavel lint proposal-42.md

    # Lint every proposal in a directory
    gavel lint proposals/

    # Drop one rule, promote another to an error
    gavel lint -A preamble-re-title -D preamble-trim proposal-42.md

    # Machine-readable output for tooling
    gavel lint --format json proposal-42.md

Exits with code 1 if any error-severity diagnostic was reported or a
document could not be parsed. Warnings alone do not fail the run.")]
    Lint {
        /// Files and/or directories to check
        #[arg(required = true)]
        #[arg(help = "Proposal files or directories to check")]
        #[arg(
            long_help = "Paths to the proposal documents to check. Directories are searched \
            (recursively, honoring ignore files) for files with an .md extension."
        )]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        #[arg(help = "Output format (text or json)")]
        format: OutputFormat,

        /// Rules to report as warnings
        #[arg(short = 'W', long)]
        #[arg(help = "Report this rule as a warning (repeatable)")]
        warn: Vec<String>,

        /// Rules to drop entirely
        #[arg(short = 'A', long)]
        #[arg(help = "Allow (silence) this rule (repeatable)")]
        allow: Vec<String>,

        /// Rules to report as errors
        #[arg(short = 'D', long)]
        #[arg(help = "Report this rule as an error (repeatable)")]
        deny: Vec<String>,

        /// Color the text output
        #[arg(long)]
        #[arg(help = "Use ANSI colors in text output")]
        color: bool,
    },
    /// List the registered lint rules
    #[command(
        long_about = "List every rule the current configuration registers, one per line, as \
        `id  kind`. The list includes the built-in rules plus any default_lints from the \
        configuration file, in the order they are evaluated."
    )]
    Rules,
    /// Parse a document and display its preamble for debugging
    #[command(
        long_about = "Parse a proposal document and display the parsed preamble for debugging \
        and understanding how gavel splits headers, values, and source lines. Parse errors are \
        printed as diagnostics."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Parse a file and show the preamble
    gavel parse proposal-42.md

    # Parse from stdin
    cat proposal-42.md | gavel parse")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
}
