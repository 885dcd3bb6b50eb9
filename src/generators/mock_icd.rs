//! Mock ICD generator.
//!
//! One strategy, four sections: the extension name/version tables, the command
//! prototype header, the command stub definitions, and the WSI export table.
//! Which section is rendered is fixed per target in the catalog.

use super::{emitted_commands, format_prototype, write_artifact, GeneratorStreams, OutputGenerator};
use crate::catalog::{MockIcdSection, TargetConfig};
use crate::errors::VkGenResult;
use crate::registry::{Extension, Registry, Selection};

pub struct MockIcdGenerator {
    streams: GeneratorStreams,
    section: MockIcdSection,
}

impl MockIcdGenerator {
    pub fn new(streams: GeneratorStreams, section: MockIcdSection) -> Self {
        MockIcdGenerator { streams, section }
    }

    fn extension_list(&self, selection: &Selection) -> String {
        let mut body = String::from(
            "#include <string>\n#include <unordered_map>\n\n\
             // Map of extension name -> spec version, split by extension type.\n",
        );
        let spec_version = |x: &Extension| x.number.clone().unwrap_or_else(|| "1".to_string());
        for (var, ext_type) in [
            ("instance_extension_map", "instance"),
            ("device_extension_map", "device"),
        ] {
            body.push_str(&format!(
                "static const std::unordered_map<std::string, uint32_t> {var} = {{\n"
            ));
            for x in selection
                .emitted_extensions()
                .filter(|x| x.ext_type.as_deref() == Some(ext_type))
            {
                body.push_str(&format!("    {{\"{}\", {}}},\n", x.name, spec_version(x)));
            }
            body.push_str("};\n\n");
        }
        body
    }

    fn commands_header(
        &self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<String> {
        let mut body = String::from("#include <vulkan/vulkan.h>\n\nnamespace vkmock {\n\n");
        for cmd in emitted_commands(registry, selection, &self.streams)? {
            body.push_str(&format_prototype(cmd, opts, "static "));
            body.push_str(";\n\n");
        }
        body.push_str("} // namespace vkmock\n");
        Ok(body)
    }

    fn command_stubs(
        &self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<String> {
        let mut body = String::from("namespace vkmock {\n\n");
        for cmd in emitted_commands(registry, selection, &self.streams)? {
            body.push_str(&format_prototype(cmd, opts, "static "));
            body.push_str(" {\n");
            match cmd.return_type.as_str() {
                "void" => {}
                "VkResult" => body.push_str("    return VK_SUCCESS;\n"),
                _ => body.push_str("    return {};\n"),
            }
            body.push_str("}\n\n");
        }
        body.push_str("} // namespace vkmock\n");
        Ok(body)
    }

    fn wsi_exports(
        &self,
        registry: &Registry,
        selection: &Selection,
    ) -> VkGenResult<String> {
        let mut body = String::from("// WSI entry points exported by the mock ICD.\n");
        let is_wsi = |name: &str| {
            name.contains("Surface") || name.contains("Swapchain") || name.contains("Present")
        };
        for cmd in emitted_commands(registry, selection, &self.streams)? {
            if !is_wsi(&cmd.name) {
                continue;
            }
            body.push_str(&format!(
                "{{\"{name}\", reinterpret_cast<PFN_vkVoidFunction>({name})}},\n",
                name = cmd.name
            ));
        }
        Ok(body)
    }
}

impl OutputGenerator for MockIcdGenerator {
    fn generate(
        &mut self,
        registry: &Registry,
        selection: &Selection,
        opts: &TargetConfig,
    ) -> VkGenResult<()> {
        let body = match self.section {
            MockIcdSection::ExtensionList => self.extension_list(selection),
            MockIcdSection::CommandsHeader => self.commands_header(registry, selection, opts)?,
            MockIcdSection::CommandStubs => self.command_stubs(registry, selection, opts)?,
            MockIcdSection::WsiExports => self.wsi_exports(registry, selection)?,
        };
        write_artifact(opts, &body)?;
        Ok(())
    }
}
