//! Common constants used throughout modgen.

/// Token replaced by the lowercase module name.
pub const RAWNAME_TOKEN: &str = "##RAWNAME##";

/// Token replaced by the capitalized module name.
pub const CLASSNAME_TOKEN: &str = "##CLASSNAME##";

/// Host configuration file, looked up in the home directory.
pub const HOST_CONFIG_FILE: &str = ".freepbxconfig";

/// Key of the host configuration holding the module checkout directory.
pub const REPO_DIRECTORY_KEY: &str = "repo_directory";

/// Module directory offered when no host configuration exists.
pub const DEFAULT_MODULE_DIR: &str = "/var/www/html/admin/modules";

/// Owner applied recursively to the generated module.
pub const DEFAULT_OWNER: &str = "asterisk:asterisk";

/// Manifest file name inside the module root.
pub const MANIFEST_FILE: &str = "module.xml";

pub const DEFAULT_RAWNAME: &str = "helloworld";
pub const DEFAULT_VERSION: &str = "14.0.1";
pub const DEFAULT_DESCRIPTION: &str = "Generated Module";

/// Developer tool linking a module checkout into the framework.
pub const LINKER_COMMAND: (&str, &[&str]) = ("/usr/src/devtools/freepbx_git.php", &["-s"]);

/// Framework installer refreshing development symlinks.
pub const SYMLINK_COMMAND: (&str, &[&str]) =
    ("/usr/src/freepbx/framework/install", &["--dev-links", "-n"]);

/// Host console used to install and reload modules.
pub const FWCONSOLE: &str = "fwconsole";
