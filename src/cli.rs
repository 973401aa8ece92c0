//! Command-line interface implementation for modgen.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::answers::Answers;
use crate::constants::DEFAULT_OWNER;
use crate::descriptor::{Category, License, ModuleKind};

/// Command-line arguments structure for modgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "modgen: creates a skeleton module for FreePBX 14+", long_about = None)]
pub struct Args {
    /// Module name (no spaces or hyphens)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Which kind of module to create
    #[arg(short, long, value_enum)]
    pub kind: Option<ModuleKind>,

    /// Module version
    #[arg(long, value_name = "VERSION")]
    pub module_version: Option<String>,

    /// Module description
    #[arg(short, long)]
    pub description: Option<String>,

    /// License of the module
    #[arg(short, long, value_enum)]
    pub license: Option<License>,

    /// Category the module is filed under
    #[arg(short, long, value_enum)]
    pub category: Option<Category>,

    /// Directory the module is created in, instead of the one from ~/.freepbxconfig
    #[arg(long, value_name = "DIR")]
    pub module_dir: Option<PathBuf>,

    /// Treat --module-dir as a development checkout (link it into the framework)
    #[arg(long, requires = "module_dir")]
    pub devmode: bool,

    /// Directory with templates overriding the bundled ones by file name
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Owner (user:group) the generated module is handed to
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Do not set permissions, install or reload after generating
    #[arg(long)]
    pub skip_host_steps: bool,

    /// Generate without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Read answers as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Answers given through flags.
    pub fn answers(&self) -> Answers {
        Answers {
            kind: self.kind,
            rawname: self.name.clone(),
            module_directory: self.module_dir.clone(),
            version: self.module_version.clone(),
            description: self.description.clone(),
            license: self.license,
            category: self.category,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
