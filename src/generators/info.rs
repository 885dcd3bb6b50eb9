//! vulkaninfo support header generator (`vulkaninfo.hpp`).
//!
//! Emits enum-to-string helpers for every enum group the selected API surface
//! requires, plus the table of reportable extensions.

use std::collections::HashSet;

use super::{write_artifact, GeneratorStreams, OutputGenerator};
use crate::catalog::TargetConfig;
use crate::errors::VkGenResult;
use crate::registry::{EnumGroup, Registry, Selection};

pub struct VulkanInfoGenerator {
    streams: GeneratorStreams,
}

impl VulkanInfoGenerator {
    pub fn new(streams: GeneratorStreams) -> Self {
        VulkanInfoGenerator { streams }
    }

    /// Enum groups named as required types by an emitted slice.
    fn required_groups<'r>(&self, registry: &'r Registry, selection: &Selection) -> Vec<&'r EnumGroup> {
        let mut required: HashSet<&str> = HashSet::new();
        for f in selection.emitted_features() {
            required.extend(f.requires.types.iter().map(String::as_str));
            required.extend(f.requires.enums.iter().map(String::as_str));
        }
        for x in selection.emitted_extensions() {
            required.extend(x.requires.types.iter().map(String::as_str));
            required.extend(x.requires.enums.iter().map(String::as_str));
        }
        registry
            .enums
            .iter()
            .filter(|g| {
                required.contains(g.name.as_str())
                    || g.enumerants.iter().any(|e| required.contains(e.name.as_str()))
            })
            .collect()
    }

    fn enum_to_string(group: &EnumGroup, expand_enumerants: bool) -> String {
        let mut out = format!(
            "static const char *{name}String({name} value) {{\n    switch (value) {{\n",
            name = group.name
        );
        for e in &group.enumerants {
            let comment = match (&e.value, expand_enumerants) {
                (Some(v), true) => format!("  // {v}"),
                _ => String::new(),
            };
            out.push_str(&format!(
                "        case {n}: return \"{n}\";{comment}\n",
                n = e.name
            ));
        }
        out.push_str("        default: return \"UNKNOWN\";\n    }\n}\n\n");
        out
    }
}

impl OutputGenerator for VulkanInfoGenerator {
    fn generate(
        &mut self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<()> {
        let mut body = String::from("#include <vulkan/vulkan.h>\n\n");

        let groups = self.required_groups(registry, selection);
        if groups.is_empty() {
            self.streams
                .warn
                .line("WARNING: no enum groups matched the current filters")?;
        }
        for group in groups {
            body.push_str(&Self::enum_to_string(group, opts.expand_enumerants));
        }

        body.push_str("// Extensions vulkaninfo knows how to report.\n");
        body.push_str("static const char *known_extensions[] = {\n");
        for x in selection.emitted_extensions() {
            body.push_str(&format!("    \"{}\",\n", x.name));
        }
        body.push_str("};\n");

        write_artifact(opts, &body)?;
        Ok(())
    }
}
