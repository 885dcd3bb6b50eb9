//! Typemap helper header generator (`vk_typemap_helper.h`).
//!
//! Emits `LvlTypeMap` / `LvlSTypeMap` specializations mapping each selected
//! struct type to its `VkStructureType` enumerant, so layer code can go from a
//! type to its sType and back at compile time.

use std::collections::HashSet;

use super::{write_artifact, GeneratorStreams, OutputGenerator};
use crate::catalog::TargetConfig;
use crate::errors::VkGenResult;
use crate::registry::{Registry, Selection, TypeDecl};

pub struct HelperFileGenerator {
    streams: GeneratorStreams,
}

impl HelperFileGenerator {
    pub fn new(streams: GeneratorStreams) -> Self {
        HelperFileGenerator { streams }
    }

    /// Struct types with an sType binding, required by an emitted slice,
    /// declaration order preserved.
    fn mapped_types<'r>(&self, registry: &'r Registry, selection: &Selection) -> Vec<&'r TypeDecl> {
        let mut required: HashSet<&str> = HashSet::new();
        for f in selection.emitted_features() {
            required.extend(f.requires.types.iter().map(String::as_str));
        }
        for x in selection.emitted_extensions() {
            required.extend(x.requires.types.iter().map(String::as_str));
        }
        registry
            .types
            .iter()
            .filter(|t| required.contains(t.name.as_str()))
            .filter(|t| t.category.as_deref() == Some("struct") && t.structure_type.is_some())
            .collect()
    }
}

impl OutputGenerator for HelperFileGenerator {
    fn generate(
        &mut self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<()> {
        let mut body = String::new();
        body.push_str("#include <vulkan/vulkan.h>\n\n");
        body.push_str(
            "// These empty generic templates are specialized for each type with sType\n\
             // members and for each sType enum value.\n\
             template <typename T> struct LvlTypeMap {};\n\
             template <VkStructureType id> struct LvlSTypeMap {};\n",
        );

        let mapped = self.mapped_types(registry, selection);
        if mapped.is_empty() {
            self.streams
                .warn
                .line("WARNING: no struct types with sType bindings matched the current filters")?;
        }
        for t in &mapped {
            // structure_type presence is checked by mapped_types
            let Some(stype) = t.structure_type.as_deref() else {
                continue;
            };
            body.push_str(&format!(
                "\n// Map type {name} to id {stype}\n\
                 template <> struct LvlTypeMap<{name}> {{\n\
                     static const VkStructureType kSType = {stype};\n\
                 }};\n\
                 \n\
                 template <> struct LvlSTypeMap<{stype}> {{\n\
                     typedef {name} Type;\n\
                 }};\n",
                name = t.name,
            ));
        }

        write_artifact(opts, &body)?;
        Ok(())
    }
}
