use std::path::PathBuf;

use clap::Parser;

use crate::catalog::CatalogFilters;
use crate::run::{self, ExecMode, GenArgs};

/// Command-line interface for the registry generator driver.
///
/// One invocation produces one generated artifact; the slice of the API it
/// covers is controlled by the feature/extension filter flags.
#[derive(Parser, Debug)]
#[command(name = "vkgen")]
#[command(about = "Generate Vulkan helper headers and sources from an API registry", long_about = None)]
pub struct Cli {
    /// Class of extensions included in targets by default
    #[arg(long, default_value = "vulkan", value_name = "CLASS")]
    pub default_extensions: String,

    /// Extension (or space-separated extensions) to add to targets
    #[arg(long = "extension", value_name = "NAME")]
    pub extensions: Vec<String>,

    /// Extension (or space-separated extensions) to remove from targets
    #[arg(long = "remove-extensions", value_name = "NAME")]
    pub remove_extensions: Vec<String>,

    /// Extension (or space-separated extensions) to emit in targets
    #[arg(long = "emit-extensions", value_name = "NAME")]
    pub emit_extensions: Vec<String>,

    /// Core API feature name (or space-separated names) to add to targets
    #[arg(long = "feature", value_name = "NAME")]
    pub features: Vec<String>,

    /// Pause interactively at the load and generation boundaries
    #[arg(long, conflicts_with = "profile")]
    pub debug: bool,

    /// Record per-phase timing and print the top entries afterwards
    #[arg(long)]
    pub profile: bool,

    /// Dump the loaded registry to regdump.txt
    #[arg(long)]
    pub dump: bool,

    /// Write diagnostics to the specified file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub diagfile: Option<PathBuf>,

    /// Write errors and warnings to the specified file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub errfile: Option<PathBuf>,

    /// Disable inclusion protection in output headers
    #[arg(long = "no-protect")]
    pub no_protect: bool,

    /// Registry document to load
    #[arg(long, default_value = "vk.xml", value_name = "FILE")]
    pub registry: PathBuf,

    /// Emit elapsed-time lines for the load and generation phases
    #[arg(long)]
    pub time: bool,

    /// Validate the registry's group consistency after loading
    #[arg(long)]
    pub validate: bool,

    /// Create the target and related files in the specified directory
    #[arg(short = 'o', long = "directory", default_value = ".", value_name = "DIR")]
    pub directory: PathBuf,

    /// Enable progress output during normal execution (quiet is the default)
    #[arg(long)]
    pub verbose: bool,

    /// Target to generate
    #[arg(value_name = "target")]
    pub target: Option<String>,
}

/// Flag values may each carry a space-separated list of names; expand them
/// before filter compilation.
fn expand_names(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split_whitespace())
        .map(str::to_string)
        .collect()
}

impl Cli {
    pub fn into_args(self) -> GenArgs {
        let mode = if self.debug {
            ExecMode::StepDebug
        } else if self.profile {
            ExecMode::Profile
        } else {
            ExecMode::Direct
        };
        GenArgs {
            registry_path: self.registry,
            target: self.target,
            filters: CatalogFilters {
                default_extensions: self.default_extensions,
                extensions: expand_names(&self.extensions),
                remove_extensions: expand_names(&self.remove_extensions),
                emit_extensions: expand_names(&self.emit_extensions),
                features: expand_names(&self.features),
                protect: !self.no_protect,
                directory: self.directory,
            },
            mode,
            time: self.time,
            quiet: !self.verbose,
            validate: self.validate,
            dump: self.dump,
            diagfile: self.diagfile,
            errfile: self.errfile,
        }
    }
}

/// Parse the process arguments and execute one run.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let args = cli.into_args();
    run::run(&args)?;
    Ok(())
}
