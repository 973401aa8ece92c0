//! Preset answers.
//! Answers given up front (command line flags or JSON on stdin) replace the
//! matching questions, which makes unattended runs possible.

use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;

use crate::descriptor::{Category, License, ModuleKind};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Answers {
    pub kind: Option<ModuleKind>,
    pub rawname: Option<String>,
    pub module_directory: Option<PathBuf>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub license: Option<License>,
    pub category: Option<Category>,
}

impl Answers {
    /// Parses answers from a JSON object. Empty input means no answers.
    pub fn from_json(content: &str) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Fills every answer missing from `self` with the one from `other`.
    pub fn or(self, other: Answers) -> Self {
        Self {
            kind: self.kind.or(other.kind),
            rawname: self.rawname.or(other.rawname),
            module_directory: self.module_directory.or(other.module_directory),
            version: self.version.or(other.version),
            description: self.description.or(other.description),
            license: self.license.or(other.license),
            category: self.category.or(other.category),
        }
    }
}

/// Reads preset answers as JSON from stdin.
pub fn load_from_stdin() -> Result<Answers> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).map_err(|e| Error::io("<stdin>", e))?;
    Answers::from_json(&buffer)
}
