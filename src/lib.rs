//! cstyle core library.
//!
//! This crate exposes programmatic APIs for scanning C source text against
//! a fixed catalog of numbered style and safety rules. Detection is
//! heuristic and lexical: no AST is built, macros and includes are not
//! resolved, and malformed input degrades to best-effort results instead of
//! erroring.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `strip`: Comment and literal stripping for single lines.
//! - `functions`: Heuristic function-boundary location.
//! - `naming`: Identifier naming-style classification.
//! - `rules`: The rule catalog and the engine that runs it.
//! - `lint`: File targeting, parallel per-file analysis, result merging.
//! - `models`: Data models for issues and review metadata.
//! - `output`: Human/JSON printers for lint results and the rule list.
//! - `utils`: Supporting helpers.
//!
//! Note: All documentation comments are written in English by convention.
pub mod cli;
pub mod config;
pub mod functions;
pub mod lint;
pub mod models;
pub mod naming;
pub mod output;
pub mod rules;
pub mod strip;
pub mod utils;
