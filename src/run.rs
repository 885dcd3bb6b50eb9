//! Top-level run orchestration.
//!
//! One invocation is a strictly sequential pipeline: load the registry
//! document, optionally validate and dump it, resolve the output streams,
//! then run exactly one generation pass in one of three execution modes.
//! Nothing persists beyond the artifact already written to disk.

use std::io::BufRead;
use std::path::PathBuf;

use tracing::info;

use crate::catalog::{build_catalog, CatalogFilters};
use crate::diag::{resolve_stream, DiagSink};
use crate::driver::{generate_target, GenOutcome};
use crate::errors::{VkGenError, VkGenResult};
use crate::registry;
use crate::timer::{end_phase, start_phase, Profiler};

/// How the generation pass is executed. The three modes are mutually
/// exclusive by construction; the CLI rejects conflicting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    #[default]
    Direct,
    /// Pause on stdin at the load and generation boundaries.
    StepDebug,
    /// Record per-phase timing and print the top entries afterwards.
    Profile,
}

/// Typed input to one run, produced by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct GenArgs {
    pub registry_path: PathBuf,
    /// Target to generate; absence is a configuration error.
    pub target: Option<String>,
    pub filters: CatalogFilters,
    pub mode: ExecMode,
    pub time: bool,
    pub quiet: bool,
    pub validate: bool,
    pub dump: bool,
    pub diagfile: Option<PathBuf>,
    pub errfile: Option<PathBuf>,
}

/// Out-of-band state shared across the phases of one invocation. Built once,
/// never shared across runs.
pub struct RunContext {
    pub diag: DiagSink,
    pub err_warn: DiagSink,
    pub time: bool,
    pub quiet: bool,
    pub profiler: Option<Profiler>,
}

/// Number of profile entries reported after a profiled run.
const PROFILE_TOP: usize = 50;

fn pause(label: &str) -> VkGenResult<()> {
    eprint!("-- step: {label}; press Enter to continue -- ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Execute one full run. Returns `Ok` for both a generated artifact and the
/// soft unknown-target condition; every other failure is fatal.
pub fn run(args: &GenArgs) -> VkGenResult<()> {
    // Streams resolve after the dump phase, so early timing goes to stderr.
    let early = DiagSink::stderr();

    if args.mode == ExecMode::StepDebug {
        pause(&format!("load registry {}", args.registry_path.display()))?;
    }
    let token = start_phase(args.time);
    let registry = registry::load(&args.registry_path)?;
    end_phase(token, "* Time to load registry =", &early)?;

    if args.validate {
        let warnings = registry.validate_groups();
        for w in &warnings {
            early.line(&w.to_string())?;
        }
        info!(count = warnings.len(), "group validation finished");
    }

    if args.dump {
        early.line("* Dumping registry to regdump.txt")?;
        let mut file = std::fs::File::create("regdump.txt").map_err(|source| {
            VkGenError::Stream {
                path: PathBuf::from("regdump.txt"),
                source,
            }
        })?;
        registry.dump_to(&mut file)?;
    }

    let ctx = RunContext {
        diag: resolve_stream(args.diagfile.as_deref())?,
        err_warn: resolve_stream(args.errfile.as_deref())?,
        time: args.time,
        quiet: args.quiet,
        profiler: (args.mode == ExecMode::Profile).then(Profiler::new),
    };

    let Some(target) = args.target.as_deref() else {
        return Err(VkGenError::Configuration(
            "no generation target specified (pass a target name, e.g. vk_typemap_helper.h)"
                .to_string(),
        ));
    };

    let catalog = build_catalog(&args.filters)?;

    match args.mode {
        ExecMode::Direct => {
            generate_target(target, &catalog, &registry, &ctx)?;
        }
        ExecMode::StepDebug => {
            pause(&format!("generate target {target}"))?;
            generate_target(target, &catalog, &registry, &ctx)?;
        }
        ExecMode::Profile => {
            let outcome = generate_target(target, &catalog, &registry, &ctx)?;
            if let Some(profiler) = &ctx.profiler {
                profiler.report(&ctx.diag, PROFILE_TOP)?;
            }
            if outcome == GenOutcome::UnknownTarget {
                info!(target, "profiled run matched no target");
            }
        }
    }
    Ok(())
}
