//! The question sequence that produces a [`ModuleDescriptor`].
//!
//! Each `ask_*` function returns the preset answer when there is one and
//! prompts otherwise. Defaults match what an operator gets by pressing enter
//! at every question.

use std::path::PathBuf;

use log::warn;
use regex::Regex;

use crate::answers::Answers;
use crate::constants::{DEFAULT_DESCRIPTION, DEFAULT_MODULE_DIR, DEFAULT_RAWNAME, DEFAULT_VERSION};
use crate::descriptor::{Category, License, ModuleDescriptor, ModuleKind};
use crate::error::{Error, Result};
use crate::prompt::Prompter;

const RAWNAME_PATTERN: &str = r"^[a-z][a-z0-9_]*$";

/// Trims and lower-cases a raw module name.
pub fn normalize_rawname(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Checks a normalized rawname: a lowercase letter followed by lowercase
/// letters, digits or underscores. Spaces and hyphens are rejected.
pub fn validate_rawname(rawname: &str) -> Result<()> {
    let pattern = Regex::new(RAWNAME_PATTERN)
        .map_err(|e| Error::ValidationError(format!("invalid module name pattern: {e}")))?;
    if pattern.is_match(rawname) {
        return Ok(());
    }
    Err(Error::ValidationError(format!(
        "'{rawname}' is not a valid module name (no spaces or hyphens, must start with a letter)"
    )))
}

fn select_from<T: Copy + std::fmt::Display>(
    prompter: &dyn Prompter,
    prompt: &str,
    choices: &[T],
    default: usize,
) -> Result<T> {
    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let index = prompter.select(prompt, &labels, default)?;
    choices
        .get(index)
        .copied()
        .ok_or_else(|| Error::PromptError(format!("selection {index} is out of range")))
}

pub fn ask_kind(prompter: &dyn Prompter, preset: &Answers) -> Result<ModuleKind> {
    match preset.kind {
        Some(kind) => Ok(kind),
        None => select_from(
            prompter,
            "Do you want to create a FreePBX or a UCP 14+ module?",
            &ModuleKind::ALL,
            2,
        ),
    }
}

/// Asks for the rawname until a valid one is given. A preset rawname is
/// validated once and rejected outright.
pub fn ask_rawname(prompter: &dyn Prompter, preset: &Answers) -> Result<String> {
    if let Some(rawname) = &preset.rawname {
        let rawname = normalize_rawname(rawname);
        validate_rawname(&rawname)?;
        return Ok(rawname);
    }

    loop {
        let answer = prompter
            .input("What is your module's name (no spaces or hyphens)?", DEFAULT_RAWNAME)?;
        let rawname = normalize_rawname(&answer);
        match validate_rawname(&rawname) {
            Ok(()) => return Ok(rawname),
            Err(err) => warn!("{err}"),
        }
    }
}

pub fn ask_module_directory(prompter: &dyn Prompter, preset: &Answers) -> Result<PathBuf> {
    match &preset.module_directory {
        Some(dir) => Ok(dir.clone()),
        None => prompter
            .input("What is the location of the FreePBX module directory?", DEFAULT_MODULE_DIR)
            .map(PathBuf::from),
    }
}

pub fn ask_version(prompter: &dyn Prompter, preset: &Answers) -> Result<String> {
    match &preset.version {
        Some(version) => Ok(version.clone()),
        None => prompter.input("What is your module's version?", DEFAULT_VERSION),
    }
}

pub fn ask_description(prompter: &dyn Prompter, preset: &Answers) -> Result<String> {
    match &preset.description {
        Some(description) => Ok(description.clone()),
        None => prompter.input("What is your module's description?", DEFAULT_DESCRIPTION),
    }
}

pub fn ask_license(prompter: &dyn Prompter, preset: &Answers) -> Result<License> {
    match preset.license {
        Some(license) => Ok(license),
        None => select_from(prompter, "What is the license for this module?", &License::ALL, 2),
    }
}

pub fn ask_category(prompter: &dyn Prompter, preset: &Answers) -> Result<Category> {
    match preset.category {
        Some(category) => Ok(category),
        None => select_from(prompter, "What type of module is this?", &Category::ALL, 2),
    }
}

/// Asks the questions left after kind, rawname and module directory are
/// known, and assembles the descriptor.
pub fn complete_descriptor(
    prompter: &dyn Prompter,
    preset: &Answers,
    kind: ModuleKind,
    rawname: String,
) -> Result<ModuleDescriptor> {
    let version = ask_version(prompter, preset)?;
    let description = ask_description(prompter, preset)?;
    let license = ask_license(prompter, preset)?;
    let category = ask_category(prompter, preset)?;
    Ok(ModuleDescriptor::new(rawname, version, description, license, category, kind))
}

/// The confirmation text listing every answer.
pub fn summary(descriptor: &ModuleDescriptor) -> String {
    format!(
        "Generate a module with the following information?\n\
         Module type: {}\n\
         Module rawname: {}\n\
         Module version: {}\n\
         Module description: {}\n\
         Module category: {}\n\
         Module license: {}\n",
        descriptor.kind(),
        descriptor.rawname(),
        descriptor.version(),
        descriptor.description(),
        descriptor.category(),
        descriptor.license(),
    )
}

/// Shows the summary and asks for confirmation; `skip` answers yes.
pub fn confirm_descriptor(
    prompter: &dyn Prompter,
    descriptor: &ModuleDescriptor,
    skip: bool,
) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    prompter.confirm(&summary(descriptor), false)
}
