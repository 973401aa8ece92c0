//! The module descriptor: the confirmed answers a generation run works from.

use std::fmt;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::constants::{CLASSNAME_TOKEN, RAWNAME_TOKEN};

/// Literal token → replacement pairs, applied in insertion order.
pub type TokenMap = IndexMap<String, String>;

/// Which flavour of module is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
pub enum ModuleKind {
    /// Integrates with the main host application only.
    #[value(name = "freepbx")]
    #[serde(rename = "freepbx")]
    PrimaryOnly,
    /// Integrates with the user control panel only.
    #[value(name = "ucp")]
    #[serde(rename = "ucp")]
    SecondaryOnly,
    /// Both integrations in one module.
    #[value(name = "both")]
    #[serde(rename = "both")]
    Both,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 3] =
        [ModuleKind::PrimaryOnly, ModuleKind::SecondaryOnly, ModuleKind::Both];

    pub fn label(self) -> &'static str {
        match self {
            ModuleKind::PrimaryOnly => "FreePBX",
            ModuleKind::SecondaryOnly => "UCP 14+",
            ModuleKind::Both => "Both",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
pub enum License {
    #[value(name = "GPLv2")]
    #[serde(rename = "GPLv2")]
    Gplv2,
    #[value(name = "GPLv3")]
    #[serde(rename = "GPLv3")]
    Gplv3,
    #[value(name = "AGPLv3")]
    #[serde(rename = "AGPLv3")]
    Agplv3,
    #[value(name = "MIT")]
    #[serde(rename = "MIT")]
    Mit,
}

impl License {
    pub const ALL: [License; 4] = [License::Gplv2, License::Gplv3, License::Agplv3, License::Mit];

    pub fn as_str(self) -> &'static str {
        match self {
            License::Gplv2 => "GPLv2",
            License::Gplv3 => "GPLv3",
            License::Agplv3 => "AGPLv3",
            License::Mit => "MIT",
        }
    }

    /// Where the full license text is published.
    pub fn link(self) -> &'static str {
        match self {
            License::Gplv2 => "http://www.gnu.org/licenses/gpl-2.0.txt",
            License::Gplv3 => "http://www.gnu.org/licenses/gpl-3.0.txt",
            License::Agplv3 => "http://www.gnu.org/licenses/agpl-3.0.txt",
            License::Mit => "https://opensource.org/licenses/MIT",
        }
    }

    /// Name of the bundled license text resource.
    pub fn resource(self) -> String {
        format!("licenses/{}", self.as_str())
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu category the host files the module under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
pub enum Category {
    #[value(name = "Admin")]
    Admin,
    #[value(name = "Applications")]
    Applications,
    #[value(name = "Connectivity")]
    Connectivity,
    #[value(name = "Reports")]
    Reports,
    #[value(name = "Settings")]
    Settings,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Admin,
        Category::Applications,
        Category::Connectivity,
        Category::Reports,
        Category::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Admin => "Admin",
            Category::Applications => "Applications",
            Category::Connectivity => "Connectivity",
            Category::Reports => "Reports",
            Category::Settings => "Settings",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to generate one module.
///
/// Built once, after every answer is known, and only ever handed out by
/// reference. The rawname is assumed to be validated already; see
/// [`crate::questionnaire::validate_rawname`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    rawname: String,
    version: String,
    description: String,
    license: License,
    category: Category,
    kind: ModuleKind,
}

impl ModuleDescriptor {
    pub fn new(
        rawname: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        license: License,
        category: Category,
        kind: ModuleKind,
    ) -> Self {
        Self {
            rawname: rawname.into(),
            version: version.into(),
            description: description.into(),
            license,
            category,
            kind,
        }
    }

    pub fn rawname(&self) -> &str {
        &self.rawname
    }

    /// The rawname with its first character upper-cased, used wherever a
    /// class-like identifier is needed.
    pub fn display_name(&self) -> String {
        capitalize(&self.rawname)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn license(&self) -> License {
        self.license
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// The default substitution set: rawname and class name.
    pub fn tokens(&self) -> TokenMap {
        let mut tokens = TokenMap::new();
        tokens.insert(RAWNAME_TOKEN.to_string(), self.rawname.clone());
        tokens.insert(CLASSNAME_TOKEN.to_string(), self.display_name());
        tokens
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
