//! Generation orchestration.
//! Runs a [`LayoutPlan`] against the host: directories, rendered files, the
//! manifest, static files, then the host steps that register the module.
//!
//! Generation is not transactional. When a step fails after the first
//! directory was created, everything written so far stays on disk and the
//! operator is told to remove the module root before retrying.

use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::constants::{FWCONSOLE, LINKER_COMMAND, MANIFEST_FILE, SYMLINK_COMMAND};
use crate::descriptor::ModuleDescriptor;
use crate::environment::{Environment, ProcessCommand, ProcessOutput};
use crate::error::{Error, Result};
use crate::layout::{plan, FileSource, LayoutPlan, StaticFile};
use crate::loader::Resource;
use crate::manifest;
use crate::template::{write_atomic, TemplateEngine};

/// What a non-zero exit of a host step means for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Abort the run with `Error::ProcessFailed`.
    Fatal,
    /// Warn and carry on.
    LogOnly,
}

/// Host steps run after the module is on disk, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStep {
    LinkModule,
    RefreshSymlinks,
    SetPermissions,
    InstallModule,
    Reload,
}

pub const HOST_STEPS: [HostStep; 5] = [
    HostStep::LinkModule,
    HostStep::RefreshSymlinks,
    HostStep::SetPermissions,
    HostStep::InstallModule,
    HostStep::Reload,
];

impl HostStep {
    pub fn label(self) -> &'static str {
        match self {
            HostStep::LinkModule => {
                "Linking your module folder into the framework module folder"
            }
            HostStep::RefreshSymlinks => "Framework updating the symlinks",
            HostStep::SetPermissions => "Setting proper permissions to your module",
            HostStep::InstallModule => "Installing your module",
            HostStep::Reload => "Reloading",
        }
    }

    pub fn policy(self) -> StepPolicy {
        match self {
            HostStep::SetPermissions => StepPolicy::Fatal,
            _ => StepPolicy::LogOnly,
        }
    }

    /// Steps that only make sense against a development checkout.
    pub fn devmode_only(self) -> bool {
        matches!(self, HostStep::LinkModule | HostStep::RefreshSymlinks)
    }
}

/// Outcome of one host step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: HostStep,
    pub output: ProcessOutput,
}

/// Everything a run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub static_files: Vec<PathBuf>,
    pub steps: Vec<StepOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// The module directory is a development checkout.
    pub devmode: bool,
    /// Skip every host step.
    pub skip_host_steps: bool,
    /// `user:group` the module is handed to.
    pub owner: String,
}

pub struct Generator<'a> {
    engine: &'a TemplateEngine<'a>,
    env: &'a dyn Environment,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(
        engine: &'a TemplateEngine<'a>,
        env: &'a dyn Environment,
        options: GeneratorOptions,
    ) -> Self {
        Self { engine, env, options }
    }

    /// Fails with `Error::PreconditionFailed` if `root` already exists.
    pub fn check_root(&self, descriptor: &ModuleDescriptor, root: &Path) -> Result<()> {
        if self.env.file_exists(root) {
            return Err(Error::PreconditionFailed(format!(
                "This name ({}) is already in use [{}]",
                descriptor.rawname(),
                root.display()
            )));
        }
        Ok(())
    }

    /// Generates the module described by `descriptor` at `root`.
    ///
    /// # Errors
    /// * `Error::PreconditionFailed` if `root` exists; nothing is created
    /// * `Error::TemplateNotFound` / `Error::IoError` while writing files
    /// * `Error::ProcessFailed` if a fatal host step exits non-zero or cannot
    ///   be started
    pub fn generate(&self, descriptor: &ModuleDescriptor, root: &Path) -> Result<GenerationReport> {
        self.check_root(descriptor, root)?;

        let plan = plan(descriptor, root);
        let mut report = GenerationReport { root: root.to_path_buf(), ..Default::default() };

        let result = self.write_plan(descriptor, &plan, &mut report).and_then(|()| {
            if self.options.skip_host_steps {
                debug!("Skipping host steps.");
                Ok(())
            } else {
                self.run_host_steps(descriptor, root, &mut report)
            }
        });

        if let Err(err) = result {
            if self.env.file_exists(root) {
                error!(
                    "Generation stopped after creating {} directories and {} files; remove '{}' before retrying.",
                    report.directories.len(),
                    report.files.len() + report.static_files.len(),
                    root.display()
                );
            }
            return Err(err);
        }

        Ok(report)
    }

    fn write_plan(
        &self,
        descriptor: &ModuleDescriptor,
        plan: &LayoutPlan,
        report: &mut GenerationReport,
    ) -> Result<()> {
        println!("Generating directories for your {} module", descriptor.kind());
        for dir in &plan.directories {
            self.env.make_dirs(std::slice::from_ref(dir))?;
            report.directories.push(dir.clone());
        }

        println!("Generating file structure for your module");
        for binding in &plan.files {
            match binding.source {
                FileSource::Empty => write_atomic(&binding.dest, b"")?,
                FileSource::Template(template_id) => {
                    self.engine.render_to_file(template_id, &binding.tokens, &binding.dest)?
                }
            }
            report.files.push(binding.dest.clone());
        }

        println!("Generating {MANIFEST_FILE}");
        write_atomic(&plan.root.join(MANIFEST_FILE), &manifest::build(descriptor))?;

        for static_file in &plan.static_files {
            self.copy_static(static_file)?;
            report.static_files.push(static_file.dest.clone());
        }

        Ok(())
    }

    fn copy_static(&self, static_file: &StaticFile) -> Result<()> {
        match self.engine.loader().locate(&static_file.resource)? {
            Resource::Embedded(content) => write_atomic(&static_file.dest, content.as_bytes()),
            Resource::File(src) => self.env.copy_file(&src, &static_file.dest),
        }
    }

    fn run_host_steps(
        &self,
        descriptor: &ModuleDescriptor,
        root: &Path,
        report: &mut GenerationReport,
    ) -> Result<()> {
        for step in HOST_STEPS {
            if step.devmode_only() && !self.options.devmode {
                continue;
            }

            println!("{}", step.label());
            let (command, output) = self.run_step(step, descriptor, root);
            let output = output.unwrap_or_else(|err| {
                debug!("'{command}' could not be started: {err}");
                ProcessOutput::not_started(&err)
            });

            if !output.success() {
                match step.policy() {
                    StepPolicy::Fatal => {
                        return Err(Error::ProcessFailed {
                            command,
                            status: output.status_text(),
                            output: output.stderr.trim().to_string(),
                        });
                    }
                    StepPolicy::LogOnly => {
                        warn!("'{}' exited with status {}.", command, output.status_text());
                    }
                }
            }

            report.steps.push(StepOutcome { step, output });
        }
        Ok(())
    }

    fn run_step(
        &self,
        step: HostStep,
        descriptor: &ModuleDescriptor,
        root: &Path,
    ) -> (String, Result<ProcessOutput>) {
        match step {
            HostStep::LinkModule => {
                let command = ProcessCommand::new(LINKER_COMMAND.0, LINKER_COMMAND.1);
                (command.to_string(), self.env.run_process(&command))
            }
            HostStep::RefreshSymlinks => {
                let command = ProcessCommand::new(SYMLINK_COMMAND.0, SYMLINK_COMMAND.1);
                (command.to_string(), self.env.run_process(&command))
            }
            HostStep::SetPermissions => (
                format!("chown -R {} {}", self.options.owner, root.display()),
                self.env.set_owner(root, &self.options.owner),
            ),
            HostStep::InstallModule => (
                format!("{FWCONSOLE} ma install {}", descriptor.rawname()),
                self.env.install_module(descriptor.rawname()),
            ),
            HostStep::Reload => (format!("{FWCONSOLE} reload"), self.env.reload_modules()),
        }
    }
}
