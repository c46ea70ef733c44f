//! cstyle CLI binary entry point.
//! Delegates to modules for config/lint/rules and prints results.

mod cli;
mod config;
mod functions;
mod lint;
mod models;
mod naming;
mod output;
mod rules;
mod strip;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use models::review::ReviewStatus;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            repo_root,
            patterns,
            output,
            enable,
            disable,
            mr_title,
            mr_conflicts,
            mr_unresolved,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &patterns,
                output.as_deref(),
                &enable,
                &disable,
            );
            if !matches!(eff.output.as_str(), "human" | "json") {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("unknown output mode '{}' (expected human|json)", eff.output)
                );
                std::process::exit(2);
            }
            // Friendly note if no cstyle config was found
            let cfg = config::load_config(&eff.repo_root);
            if eff.output != "json" && cfg.is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No cstyle.toml found; using defaults."
                );
            }
            // Emit single top info when the builtin default patterns are used
            let cfg_has_patterns = cfg.map(|c| c.patterns.is_some()).unwrap_or(false);
            if eff.output != "json" && patterns.is_empty() && !cfg_has_patterns {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!("Using default patterns: [{}]", eff.patterns.join(", "))
                );
            }
            let review = if mr_title.is_some() || mr_conflicts || mr_unresolved {
                Some(ReviewStatus {
                    title: mr_title,
                    has_conflicts: mr_conflicts,
                    unresolved_discussions: mr_unresolved,
                })
            } else {
                None
            };
            let result = lint::run_lint(&eff, review.as_ref());
            output::print_lint(&result, &eff.output);
            if result.summary.issues > 0 {
                std::process::exit(1);
            }
        }
        Commands::Rules { repo_root, output } => {
            let eff = config::resolve_effective(repo_root.as_deref(), &[], output.as_deref(), &[], &[]);
            let engine = rules::RuleEngine::new(eff.enabled_rules.clone());
            output::print_rules(&engine.catalog(), &eff.output);
        }
    }
}
