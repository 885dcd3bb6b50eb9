//! # Registry model
//!
//! The stateful collaborator one generation run is built around: the parsed
//! registry document, loaded once per invocation. It owns document loading
//! ([`load`]), the optional group-consistency validation pass, the textual
//! dump used by `--dump`, and [`Registry::run_generation`], which applies a
//! target's filter patterns and drives exactly one generator strategy pass.

mod load;
mod types;

pub use load::load;
pub use types::{
    CommandDecl, EnumGroup, Enumerant, Extension, Feature, ParamDecl, Requires, SelectedExtension,
    SelectedFeature, Selection, TypeDecl,
};

use std::collections::HashSet;
use std::io::{self, Write};

use tracing::debug;

use crate::catalog::TargetConfig;
use crate::errors::{ValidationWarning, VkGenResult};
use crate::generators::OutputGenerator;
use crate::timer::Profiler;

/// A loaded registry document. Built once per run, never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    pub types: Vec<TypeDecl>,
    pub enums: Vec<EnumGroup>,
    pub commands: Vec<CommandDecl>,
    pub features: Vec<Feature>,
    pub extensions: Vec<Extension>,
}

impl Registry {
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_command(&self, name: &str) -> Option<&CommandDecl> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Check that every `<require>` reference in every feature and extension
    /// resolves to a declared type, command, or enumerant. Inconsistencies are
    /// reported, not fatal: the registry may legitimately be a partial slice.
    pub fn validate_groups(&self) -> Vec<ValidationWarning> {
        let type_names: HashSet<&str> = self.types.iter().map(|t| t.name.as_str()).collect();
        let command_names: HashSet<&str> = self.commands.iter().map(|c| c.name.as_str()).collect();
        let enum_names: HashSet<&str> = self
            .enums
            .iter()
            .flat_map(|g| g.enumerants.iter())
            .map(|e| e.name.as_str())
            .collect();

        let mut warnings = Vec::new();
        let mut check = |owner: &str, requires: &Requires| {
            for t in &requires.types {
                if !type_names.contains(t.as_str()) {
                    warnings.push(ValidationWarning {
                        message: format!("{owner} requires undeclared type {t}"),
                    });
                }
            }
            for c in &requires.commands {
                if !command_names.contains(c.as_str()) {
                    warnings.push(ValidationWarning {
                        message: format!("{owner} requires undeclared command {c}"),
                    });
                }
            }
            for e in &requires.enums {
                if !enum_names.contains(e.as_str()) {
                    warnings.push(ValidationWarning {
                        message: format!("{owner} requires undeclared enum {e}"),
                    });
                }
            }
        };
        for f in &self.features {
            check(&f.name, &f.requires);
        }
        for x in &self.extensions {
            check(&x.name, &x.requires);
        }
        warnings
    }

    /// Write a full, human-readable dump of the loaded model.
    pub fn dump_to(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "registry dump")?;
        writeln!(w, "types: {}", self.types.len())?;
        for t in &self.types {
            writeln!(
                w,
                "  type {} category={}",
                t.name,
                t.category.as_deref().unwrap_or("-")
            )?;
        }
        writeln!(w, "enums: {}", self.enums.len())?;
        for g in &self.enums {
            writeln!(w, "  enums {}", g.name)?;
            for e in &g.enumerants {
                writeln!(w, "    {} = {}", e.name, e.value.as_deref().unwrap_or("-"))?;
            }
        }
        writeln!(w, "commands: {}", self.commands.len())?;
        for c in &self.commands {
            let params: Vec<String> = c.params.iter().map(|p| format!("{} {}", p.ty, p.name)).collect();
            writeln!(w, "  {} {}({})", c.return_type, c.name, params.join(", "))?;
        }
        writeln!(w, "features: {}", self.features.len())?;
        for f in &self.features {
            writeln!(
                w,
                "  feature {} api={} number={} ({} commands)",
                f.name,
                f.api,
                f.number,
                f.requires.commands.len()
            )?;
        }
        writeln!(w, "extensions: {}", self.extensions.len())?;
        for x in &self.extensions {
            writeln!(
                w,
                "  extension {} supported={} ({} commands)",
                x.name,
                x.supported.join(","),
                x.requires.commands.len()
            )?;
        }
        Ok(())
    }

    /// Apply a target's filter patterns to the loaded model.
    ///
    /// A feature is included when its api matches the target's api name and
    /// the versions pattern matches its name; it is emitted when the
    /// emit-versions pattern also matches. An extension is included when it is
    /// supported by the target's default-extension class or matched by the
    /// add-extensions pattern, and not matched by the remove-extensions
    /// pattern; it is emitted when the emit-extensions pattern matches.
    pub fn select(&self, opts: &TargetConfig) -> Selection {
        let mut selection = Selection::default();
        for f in &self.features {
            if f.api != opts.api_name || !opts.versions.matches(&f.name) {
                continue;
            }
            selection.features.push(SelectedFeature {
                feature: f.clone(),
                emit: opts.emit_versions.matches(&f.name),
            });
        }
        for x in &self.extensions {
            let in_default_class = x.supported.iter().any(|s| s == &opts.default_extensions);
            let added = opts.add_extensions.matches(&x.name);
            if !(in_default_class || added) || opts.remove_extensions.matches(&x.name) {
                continue;
            }
            selection.extensions.push(SelectedExtension {
                extension: x.clone(),
                emit: opts.emit_extensions.matches(&x.name),
            });
        }
        debug!(
            features = selection.features.len(),
            extensions = selection.extensions.len(),
            target = %opts.filename,
            "selection resolved"
        );
        selection
    }

    /// Drive exactly one generation pass: resolve the selection for `opts` and
    /// hand it to the bound generator strategy. With a profiler attached, the
    /// selection and render phases are recorded per label.
    pub fn run_generation(
        &self,
        gen: &mut dyn OutputGenerator,
        opts: &TargetConfig,
        profiler: Option<&Profiler>,
    ) -> VkGenResult<()> {
        let selection = match profiler {
            Some(p) => p.measure("registry: resolve selection", || self.select(opts)),
            None => self.select(opts),
        };
        match profiler {
            Some(p) => p.measure(&format!("generate {}", opts.filename), || {
                gen.generate(self, &selection, opts)
            }),
            None => gen.generate(self, &selection, opts),
        }
    }
}
