//! Resource loading for modgen.
//! Templates and static files are compiled into the binary; a directory of
//! same-named files can be layered on top to override any of them.
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Every resource shipped with modgen, by name.
const EMBEDDED: &[(&str, &str)] = &[
    ("BMO.template", include_str!("../resources/BMO.template")),
    ("BMOUCP.template", include_str!("../resources/BMOUCP.template")),
    ("BMOBoth.template", include_str!("../resources/BMOBoth.template")),
    ("UCPclass.template", include_str!("../resources/UCPclass.template")),
    ("globaljs.template", include_str!("../resources/globaljs.template")),
    ("less.template", include_str!("../resources/less.template")),
    ("page.template", include_str!("../resources/page.template")),
    ("css.template", include_str!("../resources/css.template")),
    ("js.template", include_str!("../resources/js.template")),
    ("view.template", include_str!("../resources/view.template")),
    ("ucp_config.template", include_str!("../resources/ucp_config.template")),
    ("user_settings.template", include_str!("../resources/user_settings.template")),
    ("ucp_view.template", include_str!("../resources/ucp_view.template")),
    ("README.md", include_str!("../resources/README.md")),
    ("willy.php", include_str!("../resources/willy.php")),
    ("licenses/GPLv2", include_str!("../resources/licenses/GPLv2")),
    ("licenses/GPLv3", include_str!("../resources/licenses/GPLv3")),
    ("licenses/AGPLv3", include_str!("../resources/licenses/AGPLv3")),
    ("licenses/MIT", include_str!("../resources/licenses/MIT")),
];

/// Where a resource lives once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Compiled into the binary
    Embedded(&'static str),
    /// A file on disk
    File(PathBuf),
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Embedded(_) => write!(f, "embedded resource"),
            Resource::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}

/// Trait for resolving resources by name.
pub trait ResourceLoader {
    /// Resolves `name` to a resource.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if nothing is known under `name`
    fn locate(&self, name: &str) -> Result<Resource>;

    /// Resolves `name` and returns its full content.
    fn load(&self, name: &str) -> Result<String> {
        match self.locate(name)? {
            Resource::Embedded(content) => Ok(content.to_string()),
            Resource::File(path) => {
                fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
            }
        }
    }
}

/// Loader serving only the resources compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedLoader;

impl EmbeddedLoader {
    pub fn new() -> Self {
        Self
    }

    /// Names of every embedded resource.
    pub fn names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

impl ResourceLoader for EmbeddedLoader {
    fn locate(&self, name: &str) -> Result<Resource> {
        EMBEDDED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, content)| Resource::Embedded(*content))
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
    }
}

/// Loader reading resources from a directory, falling back to the embedded
/// set for names the directory does not provide.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    fallback: EmbeddedLoader,
}

impl DirectoryLoader {
    /// Creates a loader over `root`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `root` is not a directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::ConfigError(format!(
                "template directory '{}' does not exist",
                root.display()
            )));
        }
        Ok(Self { root: root.to_path_buf(), fallback: EmbeddedLoader })
    }
}

impl ResourceLoader for DirectoryLoader {
    fn locate(&self, name: &str) -> Result<Resource> {
        let candidate = self.root.join(name);
        if candidate.is_file() {
            debug!("Using override '{}' for '{}'.", candidate.display(), name);
            return Ok(Resource::File(candidate));
        }
        self.fallback.locate(name)
    }
}

/// Picks the loader matching the command line: a directory override when
/// one was given, the embedded set otherwise.
pub fn get_loader(templates: Option<&Path>) -> Result<Box<dyn ResourceLoader>> {
    match templates {
        Some(dir) => Ok(Box::new(DirectoryLoader::new(dir)?)),
        None => Ok(Box::new(EmbeddedLoader::new())),
    }
}
