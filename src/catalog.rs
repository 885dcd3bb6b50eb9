//! Builds the per-run table of output targets.
//!
//! Each known target name maps to a generator strategy and a fully resolved
//! [`TargetConfig`]. The catalog is rebuilt from scratch on every run from the
//! user's filter lists; identical filters always produce an identical catalog.
//! Adding a new target means registering one more entry here and nothing else.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::errors::VkGenResult;
use crate::filter::{FilterDefault, FilterPattern};

/// Pluggable generator strategies, one per target family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Helper header with structure-type mappings (`vk_typemap_helper.h`).
    HelperFile,
    /// One of the mock ICD outputs.
    MockIcd(MockIcdSection),
    /// The vulkaninfo support header.
    VulkanInfo,
}

/// The section of the mock ICD a `MockIcd` target renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockIcdSection {
    ExtensionList,
    CommandsHeader,
    CommandStubs,
    WsiExports,
}

/// Fully resolved configuration for one target. Immutable once built; every
/// field is concrete before it reaches a generator strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    pub filename: String,
    pub directory: PathBuf,
    pub api_name: String,
    pub profile: Option<String>,
    pub versions: FilterPattern,
    pub emit_versions: FilterPattern,
    pub default_extensions: String,
    pub add_extensions: FilterPattern,
    pub remove_extensions: FilterPattern,
    pub emit_extensions: FilterPattern,
    /// Copyright/banner lines written verbatim at the top of the artifact.
    pub prefix_text: Vec<String>,
    /// Whether to wrap the artifact in a re-inclusion guard.
    pub protect_feature: bool,
    pub api_call: &'static str,
    pub api_entry: &'static str,
    pub api_entry_p: &'static str,
    /// Column the first parameter of a prototype is aligned to.
    pub align_func_param: usize,
    pub expand_enumerants: bool,
}

/// One catalog entry: the strategy to instantiate plus its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntry {
    pub kind: GeneratorKind,
    pub config: TargetConfig,
}

/// Mapping from target name to its entry. `BTreeMap` keeps iteration (and the
/// `--help`-style target listing) deterministic.
pub type TargetCatalog = BTreeMap<String, TargetEntry>;

/// User-supplied filter bundle the catalog is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilters {
    /// Class of extensions included by default (`supported=` match).
    pub default_extensions: String,
    /// Additional extensions to include.
    pub extensions: Vec<String>,
    /// Extensions to remove even when otherwise included.
    pub remove_extensions: Vec<String>,
    /// Extensions to emit; all included extensions when empty.
    pub emit_extensions: Vec<String>,
    /// Core API feature names to include; all when empty.
    pub features: Vec<String>,
    /// Whether artifacts get re-inclusion guards.
    pub protect: bool,
    /// Output directory for the generated artifact.
    pub directory: PathBuf,
}

const PREFIX_STRINGS: &[&str] = &[
    "/*",
    "** Copyright (c) 2015-2020 The Khronos Group Inc.",
    "**",
    "** Licensed under the Apache License, Version 2.0 (the \"License\");",
    "** you may not use this file except in compliance with the License.",
    "** You may obtain a copy of the License at",
    "**",
    "**     http://www.apache.org/licenses/LICENSE-2.0",
    "**",
    "** Unless required by applicable law or agreed to in writing, software",
    "** distributed under the License is distributed on an \"AS IS\" BASIS,",
    "** WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
    "** See the License for the specific language governing permissions and",
    "** limitations under the License.",
    "*/",
    "",
];

const VK_PREFIX_STRINGS: &[&str] = &[
    "/*",
    "** This file is generated from the Khronos Vulkan XML API Registry.",
    "**",
    "*/",
    "",
];

/// Compile the filter patterns and register every known target.
///
/// Five patterns are compiled: version inclusion and emission (both from the
/// feature list, defaulting to match-all), extension inclusion (default
/// match-none), extension exclusion (default match-none), and extension
/// emission (default match-all).
pub fn build_catalog(filters: &CatalogFilters) -> VkGenResult<TargetCatalog> {
    let versions = FilterPattern::compile(&filters.features, Some(FilterDefault::MatchAll))?;
    let emit_versions = versions.clone();
    let add_extensions =
        FilterPattern::compile(&filters.extensions, Some(FilterDefault::MatchNone))?;
    let remove_extensions =
        FilterPattern::compile(&filters.remove_extensions, Some(FilterDefault::MatchNone))?;
    let emit_extensions =
        FilterPattern::compile(&filters.emit_extensions, Some(FilterDefault::MatchAll))?;

    let prefix_text: Vec<String> = PREFIX_STRINGS
        .iter()
        .chain(VK_PREFIX_STRINGS.iter())
        .map(|s| s.to_string())
        .collect();

    // Formatting constants are generator-family properties, not user options.
    let config_for = |filename: &str| TargetConfig {
        filename: filename.to_string(),
        directory: filters.directory.clone(),
        api_name: "vulkan".to_string(),
        profile: None,
        versions: versions.clone(),
        emit_versions: emit_versions.clone(),
        default_extensions: filters.default_extensions.clone(),
        add_extensions: add_extensions.clone(),
        remove_extensions: remove_extensions.clone(),
        emit_extensions: emit_extensions.clone(),
        prefix_text: prefix_text.clone(),
        protect_feature: filters.protect,
        api_call: "VKAPI_ATTR ",
        api_entry: "VKAPI_CALL ",
        api_entry_p: "VKAPI_PTR *",
        align_func_param: 48,
        expand_enumerants: false,
    };

    let mut catalog = TargetCatalog::new();
    let mut register = |name: &str, kind: GeneratorKind| {
        catalog.insert(
            name.to_string(),
            TargetEntry {
                kind,
                config: config_for(name),
            },
        );
    };

    register("vk_typemap_helper.h", GeneratorKind::HelperFile);
    register(
        "mock_icd_extension_list.h",
        GeneratorKind::MockIcd(MockIcdSection::ExtensionList),
    );
    register(
        "mock_icd_commands.h",
        GeneratorKind::MockIcd(MockIcdSection::CommandsHeader),
    );
    register(
        "mock_icd_commands.cpp.inc",
        GeneratorKind::MockIcd(MockIcdSection::CommandStubs),
    );
    register(
        "mock_icd_wsi_exports.cpp.inc",
        GeneratorKind::MockIcd(MockIcdSection::WsiExports),
    );
    register("vulkaninfo.hpp", GeneratorKind::VulkanInfo);

    Ok(catalog)
}
