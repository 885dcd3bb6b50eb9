//! Drives a single generation pass for one resolved target.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::TargetCatalog;
use crate::generators::GeneratorStreams;
use crate::registry::Registry;
use crate::run::RunContext;
use crate::timer::{end_phase, start_phase};
use crate::errors::VkGenResult;

/// Result of one driver invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum GenOutcome {
    /// The artifact was written to the returned path.
    Generated(PathBuf),
    /// The target is not in the catalog. Reported on the diagnostic stream;
    /// nothing was written and the run ends cleanly.
    UnknownTarget,
}

/// Look up `target` in the catalog and run one generation pass against it.
///
/// An unknown target is a configuration mismatch, not a crash: it is reported
/// and the process exits cleanly with no artifact. Any failure inside the
/// generator strategy is fatal and carries the target name and filename.
pub fn generate_target(
    target: &str,
    catalog: &TargetCatalog,
    registry: &Registry,
    ctx: &RunContext,
) -> VkGenResult<GenOutcome> {
    let Some(entry) = catalog.get(target) else {
        warn!(target, "unknown generation target");
        ctx.diag
            .line(&format!("No generator options for unknown target: {target}"))?;
        return Ok(GenOutcome::UnknownTarget);
    };
    let opts = &entry.config;

    if !ctx.quiet {
        ctx.diag.line(&format!("* Building {}", opts.filename))?;
        ctx.diag
            .line(&format!("* options.versions          = {}", opts.versions))?;
        ctx.diag
            .line(&format!("* options.emitversions      = {}", opts.emit_versions))?;
        ctx.diag.line(&format!(
            "* options.defaultExtensions = {}",
            opts.default_extensions
        ))?;
        ctx.diag
            .line(&format!("* options.addExtensions     = {}", opts.add_extensions))?;
        ctx.diag.line(&format!(
            "* options.removeExtensions  = {}",
            opts.remove_extensions
        ))?;
        ctx.diag
            .line(&format!("* options.emitExtensions    = {}", opts.emit_extensions))?;
    }

    let token = start_phase(ctx.time);
    let streams = GeneratorStreams {
        err: ctx.err_warn.clone(),
        warn: ctx.err_warn.clone(),
        diag: ctx.diag.clone(),
    };
    let mut gen = entry.kind.instantiate(streams);
    registry.run_generation(gen.as_mut(), opts, ctx.profiler.as_ref())?;

    if !ctx.quiet {
        ctx.diag.line(&format!("* Generated {}", opts.filename))?;
    }
    end_phase(
        token,
        &format!("* Time to generate {} =", opts.filename),
        &ctx.diag,
    )?;

    let path = opts.directory.join(&opts.filename);
    info!(target, path = %path.display(), "artifact generated");
    Ok(GenOutcome::Generated(path))
}
