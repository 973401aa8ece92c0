//! Template rendering for modgen.
//! Templates are plain text carrying literal `##TOKEN##` markers; rendering
//! replaces each marker with its value and leaves every other byte alone.
use crate::descriptor::TokenMap;
use crate::error::{Error, Result};
use crate::loader::ResourceLoader;
use log::debug;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template text with the given tokens.
    fn render(&self, template: &str, tokens: &TokenMap) -> String;
}

/// Literal, single-pass token replacement.
///
/// At every position the first token of the map that matches there wins.
/// Replacement text is copied to the output and never scanned again, so a
/// value that happens to contain a marker stays as it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenRenderer;

impl TokenRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TokenRenderer {
    fn render(&self, template: &str, tokens: &TokenMap) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        loop {
            // Earliest match; ties go to the token inserted first.
            let next = tokens
                .iter()
                .filter(|(token, _)| !token.is_empty())
                .filter_map(|(token, value)| rest.find(token.as_str()).map(|at| (at, token, value)))
                .min_by_key(|(at, _, _)| *at);

            match next {
                Some((at, token, value)) => {
                    out.push_str(&rest[..at]);
                    out.push_str(value);
                    rest = &rest[at + token.len()..];
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }

        out
    }
}

/// Resolves named templates and renders them.
pub struct TemplateEngine<'a> {
    loader: &'a dyn ResourceLoader,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(loader: &'a dyn ResourceLoader, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { loader, renderer }
    }

    pub fn loader(&self) -> &dyn ResourceLoader {
        self.loader
    }

    /// Renders the template named `template_id`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the name does not resolve
    /// * `Error::IoError` if an on-disk override cannot be read
    pub fn render(&self, template_id: &str, tokens: &TokenMap) -> Result<String> {
        let template = self.loader.load(template_id)?;
        Ok(self.renderer.render(&template, tokens))
    }

    /// Renders `template_id` and writes the result to `dest`, replacing any
    /// existing file. The parent directory must already exist.
    pub fn render_to_file(&self, template_id: &str, tokens: &TokenMap, dest: &Path) -> Result<()> {
        let content = self.render(template_id, tokens)?;
        debug!("Rendering '{}' to '{}'.", template_id, dest.display());
        write_atomic(dest, content.as_bytes())
    }
}

/// Writes `content` to `dest` in full or not at all.
///
/// The bytes go to a temporary file next to `dest` which is then renamed
/// over it, so readers never observe a truncated file. Parent directories
/// are not created.
pub fn write_atomic(dest: &Path, content: &[u8]) -> Result<()> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).map_err(|e| Error::io(dest, e))?;
    file.write_all(content).map_err(|e| Error::io(dest, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::io(dest, e))?;
    }

    file.persist(dest).map_err(|e| Error::io(dest, e.error))?;
    Ok(())
}
