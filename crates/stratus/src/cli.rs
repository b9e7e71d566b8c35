//! Clap derive structures for the `stratus` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stratus -- bandwidth reporting for cloud infrastructure accounts
#[derive(Debug, Parser)]
#[command(
    name = "stratus",
    version,
    about = "Report bandwidth usage across your cloud account",
    long_about = "A CLI for the Stratus cloud infrastructure account API.\n\n\
        Aggregates metered bandwidth for virtual guests, hardware servers,\n\
        and bandwidth pools into a single sortable report.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "STRATUS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API endpoint URL (overrides profile)
    #[arg(long, short = 'e', env = "STRATUS_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API key
    #[arg(long, env = "STRATUS_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STRATUS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STRATUS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STRATUS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Usage reports across account devices
    #[command(alias = "rep")]
    Report(ReportArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Bandwidth usage per device, summed over a date window
    #[command(alias = "bw")]
    Bandwidth(BandwidthArgs),
}

#[derive(Debug, Args)]
pub struct BandwidthArgs {
    /// Window start, "YYYY-MM-DD" or "YYYY-MM-DD HH:MM:SS"
    /// (default: one month before the end)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end in the same forms (default: now)
    #[arg(long)]
    pub end: Option<String>,

    /// Column to sort by: type, hostname, publicIn, publicOut,
    /// privateIn, privateOut, pool (default: hostname)
    #[arg(long)]
    pub sortby: Option<String>,

    /// Only include virtual guests
    #[arg(long = "virtual")]
    pub virtual_guests: bool,

    /// Only include hardware servers
    #[arg(long = "server")]
    pub server: bool,

    /// Only include bandwidth pools
    #[arg(long = "pool")]
    pub pool: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
