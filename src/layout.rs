//! Layout planning: which directories and files a module of a given kind
//! consists of, and where each file's content comes from.
//!
//! The layouts are static tables keyed by [`ModuleKind`]. Paths in the tables
//! carry the same `##TOKEN##` markers as the templates and are expanded with
//! the descriptor's tokens, so file names and class names always derive from
//! one rawname.

use std::path::{Path, PathBuf};

use crate::descriptor::{ModuleDescriptor, ModuleKind, TokenMap};
use crate::template::{TemplateRenderer, TokenRenderer};

/// Content source of a planned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    /// Zero-byte placeholder
    Empty,
    /// Rendered from the named template
    Template(&'static str),
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBinding {
    pub source: FileSource,
    pub dest: PathBuf,
    pub tokens: TokenMap,
}

/// A resource copied verbatim into the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub resource: String,
    pub dest: PathBuf,
}

/// Everything to create for one module, directories first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<FileBinding>,
    pub static_files: Vec<StaticFile>,
}

struct FileSpec {
    path: &'static str,
    source: FileSource,
}

struct VariantLayout {
    directories: &'static [&'static str],
    files: &'static [FileSpec],
    static_files: &'static [(&'static str, &'static str)],
}

const fn template(path: &'static str, name: &'static str) -> FileSpec {
    FileSpec { path, source: FileSource::Template(name) }
}

const fn empty(path: &'static str) -> FileSpec {
    FileSpec { path, source: FileSource::Empty }
}

const PRIMARY: VariantLayout = VariantLayout {
    directories: &["views", "assets/css", "assets/js"],
    files: &[
        template("##CLASSNAME##.class.php", "BMO.template"),
        empty("install.php"),
        empty("uninstall.php"),
        empty("module.xml"),
        template("page.##RAWNAME##.php", "page.template"),
        template("assets/css/##RAWNAME##.css", "css.template"),
        template("assets/js/##RAWNAME##.js", "js.template"),
        template("views/main.php", "view.template"),
    ],
    static_files: &[],
};

const SECONDARY: VariantLayout = VariantLayout {
    directories: &["views", "ucp/assets/js", "ucp/assets/less", "ucp/views"],
    files: &[
        template("##CLASSNAME##.class.php", "BMOUCP.template"),
        empty("install.php"),
        empty("uninstall.php"),
        empty("module.xml"),
        template("views/ucp_config.php", "ucp_config.template"),
        template("ucp/##CLASSNAME##.class.php", "UCPclass.template"),
        template("ucp/assets/js/global.js", "globaljs.template"),
        template("ucp/assets/less/##CLASSNAME##.less", "less.template"),
        template("ucp/views/user_settings.php", "user_settings.template"),
        template("ucp/views/##RAWNAME##.php", "ucp_view.template"),
    ],
    static_files: &[("willy.php", "ucp/views/willy.php"), ("README.md", "README.md")],
};

const BOTH: VariantLayout = VariantLayout {
    directories: &[
        "views",
        "assets/css",
        "assets/js",
        "ucp/assets/js",
        "ucp/assets/less",
        "ucp/views",
    ],
    files: &[
        template("##CLASSNAME##.class.php", "BMOBoth.template"),
        empty("install.php"),
        empty("uninstall.php"),
        empty("module.xml"),
        template("page.##RAWNAME##.php", "page.template"),
        template("assets/css/##RAWNAME##.css", "css.template"),
        template("assets/js/##RAWNAME##.js", "js.template"),
        template("views/main.php", "view.template"),
        template("views/ucp_config.php", "ucp_config.template"),
        template("ucp/##CLASSNAME##.class.php", "UCPclass.template"),
        template("ucp/assets/js/global.js", "globaljs.template"),
        template("ucp/assets/less/##CLASSNAME##.less", "less.template"),
        template("ucp/views/user_settings.php", "user_settings.template"),
        template("ucp/views/##RAWNAME##.php", "ucp_view.template"),
    ],
    static_files: &[("willy.php", "ucp/views/willy.php"), ("README.md", "README.md")],
};

fn variant(kind: ModuleKind) -> &'static VariantLayout {
    match kind {
        ModuleKind::PrimaryOnly => &PRIMARY,
        ModuleKind::SecondaryOnly => &SECONDARY,
        ModuleKind::Both => &BOTH,
    }
}

/// Computes the directories and files for `descriptor` under `root`.
///
/// Pure: the same descriptor and root always give the same plan, with
/// directories and files each sorted by destination path. The caller is
/// responsible for checking that `root` does not exist yet.
pub fn plan(descriptor: &ModuleDescriptor, root: &Path) -> LayoutPlan {
    let layout = variant(descriptor.kind());
    let tokens = descriptor.tokens();
    let expand = |path: &str| root.join(TokenRenderer.render(path, &tokens));

    let mut directories: Vec<PathBuf> = layout.directories.iter().copied().map(&expand).collect();
    directories.sort();
    directories.dedup();

    let mut files: Vec<FileBinding> = layout
        .files
        .iter()
        .map(|spec| FileBinding {
            source: spec.source,
            dest: expand(spec.path),
            tokens: tokens.clone(),
        })
        .collect();
    files.sort_by(|a, b| a.dest.cmp(&b.dest));

    let license = descriptor.license().resource();
    let mut static_files = vec![StaticFile { resource: license, dest: root.join("LICENSE") }];
    static_files.extend(layout.static_files.iter().map(|&(resource, dest)| StaticFile {
        resource: resource.to_string(),
        dest: expand(dest),
    }));
    static_files.sort_by(|a, b| a.dest.cmp(&b.dest));

    LayoutPlan { root: root.to_path_buf(), directories, files, static_files }
}
