//! In-memory model of a loaded API registry document.

/// A type declaration (`<type name="VkInstance" category="handle"/>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Registry category: `handle`, `struct`, `enum`, `basetype`, ...
    pub category: Option<String>,
    /// For struct types, the `VkStructureType` enumerant bound to the type
    /// (`structextends`-style metadata used by the typemap helper).
    pub structure_type: Option<String>,
}

/// One parameter of a command declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: String,
}

/// A command declaration (`<command name="vkCreateDevice" returntype="VkResult">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDecl {
    pub name: String,
    pub return_type: String,
    pub params: Vec<ParamDecl>,
}

/// One enumerant inside an enum group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerant {
    pub name: String,
    pub value: Option<String>,
}

/// A named enum group (`<enums name="VkResult">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumGroup {
    pub name: String,
    pub enumerants: Vec<Enumerant>,
}

/// Names required by a feature or extension, gathered from its `<require>` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requires {
    pub types: Vec<String>,
    pub commands: Vec<String>,
    pub enums: Vec<String>,
}

/// A versioned core-API slice (`<feature api="vulkan" name="VK_VERSION_1_1" number="1.1">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub api: String,
    pub name: String,
    pub number: String,
    pub requires: Requires,
}

/// An optional API slice (`<extension name="VK_KHR_surface" supported="vulkan" type="instance">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub number: Option<String>,
    /// Extension classes this extension belongs to (comma-separated `supported=`).
    pub supported: Vec<String>,
    /// `instance` or `device`, when declared.
    pub ext_type: Option<String>,
    pub requires: Requires,
}

/// A feature or extension picked by the filter patterns for one generation
/// pass. `emit` distinguishes slices that are rendered from slices that only
/// contribute declarations context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFeature {
    pub feature: Feature,
    pub emit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedExtension {
    pub extension: Extension,
    pub emit: bool,
}

/// The API slice one generation pass operates on, resolved from a
/// `TargetConfig`'s filter patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub features: Vec<SelectedFeature>,
    pub extensions: Vec<SelectedExtension>,
}

impl Selection {
    /// Iterate the features that are actually rendered.
    pub fn emitted_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.emit).map(|f| &f.feature)
    }

    /// Iterate the extensions that are actually rendered.
    pub fn emitted_extensions(&self) -> impl Iterator<Item = &Extension> {
        self.extensions
            .iter()
            .filter(|e| e.emit)
            .map(|e| &e.extension)
    }
}
