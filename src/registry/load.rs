//! Loads a registry document from disk into the in-memory model.
//!
//! The accepted schema is an attribute-based registry layout:
//!
//! ```xml
//! <registry>
//!   <types>
//!     <type name="VkInstance" category="handle"/>
//!     <type name="VkInstanceCreateInfo" category="struct"
//!           stype="VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO"/>
//!   </types>
//!   <enums name="VkResult">
//!     <enum name="VK_SUCCESS" value="0"/>
//!   </enums>
//!   <commands>
//!     <command name="vkCreateInstance" returntype="VkResult">
//!       <param name="pCreateInfo" type="const VkInstanceCreateInfo*"/>
//!     </command>
//!   </commands>
//!   <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
//!     <require><type name="VkInstance"/><command name="vkCreateInstance"/></require>
//!   </feature>
//!   <extensions>
//!     <extension name="VK_KHR_surface" number="1" supported="vulkan" type="instance">
//!       <require><command name="vkDestroySurfaceKHR"/></require>
//!     </extension>
//!   </extensions>
//! </registry>
//! ```
//!
//! Unknown elements and attributes are ignored so registries can carry vendor
//! metadata without breaking older drivers.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::types::{
    CommandDecl, EnumGroup, Enumerant, Extension, Feature, ParamDecl, Requires, TypeDecl,
};
use super::Registry;
use crate::errors::{VkGenError, VkGenResult};

/// Read and parse the registry document at `path`. Any failure here is fatal
/// and aborts the run before target resolution.
pub fn load(path: &Path) -> VkGenResult<Registry> {
    let content = std::fs::read_to_string(path).map_err(|e| VkGenError::RegistryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let registry = parse_document(&content).map_err(|reason| VkGenError::RegistryLoad {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        types = registry.types.len(),
        commands = registry.commands.len(),
        features = registry.features.len(),
        extensions = registry.extensions.len(),
        "registry loaded"
    );
    Ok(registry)
}

fn attr(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, String> {
    for a in e.attributes() {
        let a = a.map_err(|err| err.to_string())?;
        if a.key.as_ref() == key.as_bytes() {
            let v = a.unescape_value().map_err(|err| err.to_string())?;
            return Ok(Some(v.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(e: &BytesStart<'_>, key: &str, element: &str) -> Result<String, String> {
    attr(e, key)?.ok_or_else(|| format!("<{element}> is missing required attribute '{key}'"))
}

/// Parse one registry document. Returns a human-readable reason on failure.
pub(super) fn parse_document(xml: &str) -> Result<Registry, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut registry = Registry::default();
    let mut saw_root = false;

    // Open containers, innermost last.
    let mut command: Option<CommandDecl> = None;
    let mut enum_group: Option<EnumGroup> = None;
    let mut feature: Option<Feature> = None;
    let mut extension: Option<Extension> = None;
    let mut in_require = false;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"registry" => saw_root = true,
                    b"type" if in_require => {
                        let name = required_attr(e, "name", "type")?;
                        require_block(&mut feature, &mut extension)?.types.push(name);
                    }
                    b"type" => registry.types.push(TypeDecl {
                        name: required_attr(e, "name", "type")?,
                        category: attr(e, "category")?,
                        structure_type: attr(e, "stype")?,
                    }),
                    b"enums" => {
                        enum_group = Some(EnumGroup {
                            name: required_attr(e, "name", "enums")?,
                            enumerants: Vec::new(),
                        });
                        if empty {
                            registry.enums.extend(enum_group.take());
                        }
                    }
                    b"enum" if in_require => {
                        let name = required_attr(e, "name", "enum")?;
                        require_block(&mut feature, &mut extension)?.enums.push(name);
                    }
                    b"enum" => {
                        let group = enum_group
                            .as_mut()
                            .ok_or("<enum> outside an <enums> group")?;
                        group.enumerants.push(Enumerant {
                            name: required_attr(e, "name", "enum")?,
                            value: attr(e, "value")?,
                        });
                    }
                    b"command" if in_require => {
                        let name = required_attr(e, "name", "command")?;
                        require_block(&mut feature, &mut extension)?
                            .commands
                            .push(name);
                    }
                    b"command" => {
                        command = Some(CommandDecl {
                            name: required_attr(e, "name", "command")?,
                            return_type: attr(e, "returntype")?.unwrap_or_else(|| "void".into()),
                            params: Vec::new(),
                        });
                        if empty {
                            registry.commands.extend(command.take());
                        }
                    }
                    b"param" => {
                        let cmd = command.as_mut().ok_or("<param> outside a <command>")?;
                        cmd.params.push(ParamDecl {
                            name: required_attr(e, "name", "param")?,
                            ty: required_attr(e, "type", "param")?,
                        });
                    }
                    b"feature" => {
                        feature = Some(Feature {
                            api: required_attr(e, "api", "feature")?,
                            name: required_attr(e, "name", "feature")?,
                            number: required_attr(e, "number", "feature")?,
                            requires: Requires::default(),
                        });
                        if empty {
                            registry.features.extend(feature.take());
                        }
                    }
                    b"extension" => {
                        let supported = required_attr(e, "supported", "extension")?
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                        extension = Some(Extension {
                            name: required_attr(e, "name", "extension")?,
                            number: attr(e, "number")?,
                            supported,
                            ext_type: attr(e, "type")?,
                            requires: Requires::default(),
                        });
                        if empty {
                            registry.extensions.extend(extension.take());
                        }
                    }
                    b"require" => in_require = true,
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"require" => in_require = false,
                b"command" => registry.commands.extend(command.take()),
                b"enums" => registry.enums.extend(enum_group.take()),
                b"feature" => registry.features.extend(feature.take()),
                b"extension" => registry.extensions.extend(extension.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("document has no <registry> root element".to_string());
    }
    Ok(registry)
}

/// The `<require>` block currently being filled, whichever container is open.
fn require_block<'a>(
    feature: &'a mut Option<Feature>,
    extension: &'a mut Option<Extension>,
) -> Result<&'a mut Requires, String> {
    if let Some(f) = feature.as_mut() {
        Ok(&mut f.requires)
    } else if let Some(x) = extension.as_mut() {
        Ok(&mut x.requires)
    } else {
        Err("<require> outside a <feature> or <extension>".to_string())
    }
}
