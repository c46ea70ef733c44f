//! Configuration discovery and effective settings resolution.
//!
//! cstyle reads `cstyle.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `patterns`: `**/*.c`, `**/*.h`
//! - `output`: `human`
//! - `rules`: every implemented rule except 15 and 27
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::rules::default_enabled;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `cstyle.toml|yaml`.
pub struct CstyleConfig {
    pub patterns: Option<Vec<String>>,
    pub output: Option<String>,
    #[serde(default)]
    pub rules: Option<RulesCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule gating section under `[rules]`.
pub struct RulesCfg {
    #[serde(default)]
    pub enable: Vec<u32>,
    #[serde(default)]
    pub disable: Vec<u32>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub patterns: Vec<String>,
    pub output: String,
    pub enabled_rules: BTreeSet<u32>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `cstyle.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("cstyle.toml").exists()
            || cur.join("cstyle.yaml").exists()
            || cur.join("cstyle.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `CstyleConfig` from `cstyle.toml` or `cstyle.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<CstyleConfig> {
    let toml_path = root.join("cstyle.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: CstyleConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["cstyle.yaml", "cstyle.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: CstyleConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults. `cli_enable`/`cli_disable` are applied last, so a CLI switch
/// always wins over the config file.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_patterns: &[String],
    cli_output: Option<&str>,
    cli_enable: &[u32],
    cli_disable: &[u32],
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let patterns = if !cli_patterns.is_empty() {
        cli_patterns.to_vec()
    } else {
        cfg.patterns
            .unwrap_or_else(|| vec!["**/*.c".to_string(), "**/*.h".to_string()])
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let mut enabled_rules = default_enabled();
    if let Some(rules) = cfg.rules {
        for id in rules.enable {
            enabled_rules.insert(id);
        }
        for id in rules.disable {
            enabled_rules.remove(&id);
        }
    }
    for &id in cli_enable {
        enabled_rules.insert(id);
    }
    for &id in cli_disable {
        enabled_rules.remove(&id);
    }

    Effective {
        repo_root,
        patterns,
        output,
        enabled_rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("cstyle.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
patterns = ["src/**/*.c"]
output = "json"
[rules]
enable = [15]
disable = [3]
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), &[], None, &[], &[]);
        assert_eq!(eff.patterns, vec!["src/**/*.c"]);
        assert_eq!(eff.output, "json");
        assert!(eff.enabled_rules.contains(&15));
        assert!(!eff.enabled_rules.contains(&3));
        assert!(!eff.enabled_rules.contains(&27));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("cstyle.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], None, &[], &[]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, vec!["**/*.c", "**/*.h"]);
        // Suppressed rules stay off unless enabled somewhere.
        assert!(!eff.enabled_rules.contains(&15));
        assert!(eff.enabled_rules.contains(&4));
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("cstyle.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[rules]
enable = [15]
            "#
        )
        .unwrap();

        let cli_patterns = vec!["lab1/*.c".to_string()];
        let eff = resolve_effective(
            root.to_str(),
            &cli_patterns,
            Some("human"),
            &[27],
            &[15],
        );
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, cli_patterns);
        // CLI disable beats config enable; CLI enable turns 27 on.
        assert!(!eff.enabled_rules.contains(&15));
        assert!(eff.enabled_rules.contains(&27));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), &[], None, &[], &[]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, vec!["**/*.c", "**/*.h"]);
    }
}
