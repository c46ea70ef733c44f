//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cstyle",
    version,
    about = "cstyle — heuristic C style checker",
    long_about = "cstyle — a tiny, fast linter that flags violations of a numbered C style/safety policy.\n\nDetection is lexical and heuristic: no AST, no preprocessing, best-effort results on partial input.\n\nConfiguration precedence: CLI > cstyle.toml > defaults.",
    after_help = "Examples:\n  cstyle lint\n  cstyle lint --pattern 'lab1/**/*.c' --output json\n  cstyle lint --enable 15 --disable 3\n  cstyle lint --mr-title 'lab 1' --mr-conflicts\n  cstyle rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and rule inspection.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current cstyle version.")]
    Version,
    /// Lint C sources against the rule catalog
    #[command(
        about = "Run lint checks",
        long_about = "Scan files matched by the configured patterns and report rule violations. Exits 1 when any finding exists.",
        after_help = "Examples:\n  cstyle lint --repo-root ./lab1\n  cstyle lint --pattern 'src/**/*.c' --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(
            long = "pattern",
            help = "Glob pattern relative to the root; repeatable (default: **/*.c, **/*.h)"
        )]
        patterns: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long = "enable", help = "Rule id to enable; repeatable (e.g. 15)")]
        enable: Vec<u32>,
        #[arg(long = "disable", help = "Rule id to disable; repeatable")]
        disable: Vec<u32>,
        #[arg(long, help = "Merge-request title to check against the 'lab N' policy")]
        mr_title: Option<String>,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Report the merge request as having conflicts"
        )]
        mr_conflicts: bool,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Report the merge request as having unresolved discussions"
        )]
        mr_unresolved: bool,
    },
    /// List the rule catalog
    #[command(
        about = "List rules",
        long_about = "Print the implemented rule ids with their names and default/effective enabled status."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
