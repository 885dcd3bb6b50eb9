//! # Generator strategies
//!
//! Pluggable algorithms that render one target's artifact from a resolved
//! [`TargetConfig`](crate::catalog::TargetConfig) and the loaded registry
//! model. A strategy is constructed with the run's error/warning/diagnostic
//! streams, receives the configuration at generation time, and writes exactly
//! one file (`directory/filename`) as its only side effect.

mod helper_file;
mod info;
mod mock_icd;

pub use helper_file::HelperFileGenerator;
pub use info::VulkanInfoGenerator;
pub use mock_icd::MockIcdGenerator;

use std::path::PathBuf;

use askama::Template;

use crate::catalog::{GeneratorKind, TargetConfig};
use crate::diag::DiagSink;
use crate::errors::{VkGenError, VkGenResult};
use crate::registry::{CommandDecl, Registry, Selection};

/// The three output streams every strategy is constructed with.
#[derive(Clone)]
pub struct GeneratorStreams {
    pub err: DiagSink,
    pub warn: DiagSink,
    pub diag: DiagSink,
}

/// One generation pass. Implementations render the artifact body and hand it
/// to [`write_artifact`]; they never write any other file.
pub trait OutputGenerator {
    fn generate(
        &mut self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<()>;
}

impl GeneratorKind {
    /// Instantiate the strategy bound to a catalog entry.
    pub fn instantiate(self, streams: GeneratorStreams) -> Box<dyn OutputGenerator> {
        match self {
            GeneratorKind::HelperFile => Box::new(HelperFileGenerator::new(streams)),
            GeneratorKind::MockIcd(section) => Box::new(MockIcdGenerator::new(streams, section)),
            GeneratorKind::VulkanInfo => Box::new(VulkanInfoGenerator::new(streams)),
        }
    }
}

#[derive(Template)]
#[template(path = "header.txt", escape = "none")]
struct HeaderTemplate<'a> {
    prefix_text: &'a [String],
    protect: bool,
    guard: &'a str,
    body: &'a str,
}

/// Derive the re-inclusion guard macro from the output filename.
pub(crate) fn guard_macro(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Render the shared preamble/guard scaffold around `body` and write the
/// artifact to `directory/filename`. Returns the path written.
pub(crate) fn write_artifact(opts: &TargetConfig, body: &str) -> VkGenResult<PathBuf> {
    let guard = guard_macro(&opts.filename);
    let rendered = HeaderTemplate {
        prefix_text: &opts.prefix_text,
        protect: opts.protect_feature,
        guard: &guard,
        body,
    }
    .render()
    .map_err(|e| VkGenError::Generation {
        target: opts.filename.clone(),
        filename: opts.filename.clone(),
        reason: format!("template rendering failed: {e}"),
    })?;

    let path = opts.directory.join(&opts.filename);
    std::fs::write(&path, rendered).map_err(|source| VkGenError::Stream {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Commands required by the emitted features and extensions, declaration
/// order preserved, duplicates dropped. Required-but-undeclared commands are
/// reported on the warning stream and skipped.
pub(crate) fn emitted_commands<'r>(
    registry: &'r Registry,
    selection: &Selection,
    streams: &GeneratorStreams,
) -> VkGenResult<Vec<&'r CommandDecl>> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    let owners = selection
        .emitted_features()
        .map(|f| (f.name.as_str(), &f.requires.commands))
        .chain(
            selection
                .emitted_extensions()
                .map(|x| (x.name.as_str(), &x.requires.commands)),
        );
    for (owner, commands) in owners {
        for name in commands {
            if !seen.insert(name.as_str()) {
                continue;
            }
            match registry.find_command(name) {
                Some(cmd) => out.push(cmd),
                None => streams.warn.line(&format!(
                    "WARNING: {owner} requires command {name}, which is not declared; skipping"
                ))?,
            }
        }
    }
    Ok(out)
}

/// Format one C prototype with the configured decorations, parameter names
/// aligned to `align_func_param`.
pub(crate) fn format_prototype(cmd: &CommandDecl, opts: &TargetConfig, prefix: &str) -> String {
    let mut out = format!(
        "{prefix}{}{} {}{}(",
        opts.api_call, cmd.return_type, opts.api_entry, cmd.name
    );
    if cmd.params.is_empty() {
        out.push_str("void)");
        return out;
    }
    out.push('\n');
    let width = opts.align_func_param.saturating_sub(4);
    let last = cmd.params.len() - 1;
    for (i, p) in cmd.params.iter().enumerate() {
        let pad = width.max(p.ty.len() + 1);
        out.push_str(&format!("    {:<pad$}{}", p.ty, p.name));
        out.push_str(if i == last { ")" } else { ",\n" });
    }
    out
}
