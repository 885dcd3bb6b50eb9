//! # vkgen
//!
//! **vkgen** is an offline generator driver: it turns a machine-readable API
//! registry (types, commands, versioned features, optional extensions) into
//! one concrete output artifact per invocation — a helper header, a mock ICD
//! source fragment, or vulkaninfo support code. Which slice of the API the
//! artifact covers is controlled by user-supplied feature/extension filters.
//!
//! ## Architecture
//!
//! - **[`filter`]** - compiles name lists into anchored exact-match patterns
//! - **[`timer`]** - phase timing and the profiled-mode recorder
//! - **[`catalog`]** - per-run table of targets, each bound to a generator
//!   strategy and a fully resolved configuration
//! - **[`registry`]** - the loaded registry document: parsing, validation,
//!   dumping, and driving one generation pass
//! - **[`generators`]** - the pluggable output strategies (helper file,
//!   mock ICD sections, vulkaninfo header)
//! - **[`driver`]** - runs one generation pass with timing and diagnostics
//! - **[`run`]** - top-level orchestration and execution modes
//! - **[`cli`]** - the clap front end
//!
//! ## Data flow
//!
//! ```text
//! filter flags → FilterPattern → TargetCatalog → generate_target
//!                                                  └─ Registry::run_generation → one artifact
//! ```
//!
//! The whole run is single-threaded and one-shot: the catalog and every
//! configuration in it are rebuilt from scratch each invocation and discarded
//! at exit.

pub mod catalog;
pub mod cli;
pub mod diag;
pub mod driver;
pub mod errors;
pub mod filter;
pub mod generators;
pub mod registry;
pub mod run;
pub mod timer;

pub use catalog::{build_catalog, CatalogFilters, GeneratorKind, TargetCatalog, TargetConfig};
pub use diag::DiagSink;
pub use driver::{generate_target, GenOutcome};
pub use errors::{ValidationWarning, VkGenError, VkGenResult};
pub use filter::{FilterDefault, FilterPattern};
pub use registry::Registry;
pub use run::{ExecMode, GenArgs, RunContext};
