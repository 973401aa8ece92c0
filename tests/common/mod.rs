#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use modgen::descriptor::{Category, License, ModuleDescriptor, ModuleKind};
use modgen::environment::{Environment, ProcessCommand, ProcessOutput, SystemEnvironment};
use modgen::error::{Error, Result};
use modgen::prompt::Prompter;

pub fn descriptor(kind: ModuleKind) -> ModuleDescriptor {
    ModuleDescriptor::new(
        "helloworld",
        "14.0.1",
        "Generated Module",
        License::Agplv3,
        Category::Connectivity,
        kind,
    )
}

/// Real filesystem, recorded processes.
#[derive(Default)]
pub struct RecordingEnvironment {
    pub commands: RefCell<Vec<ProcessCommand>>,
    /// Programs that exit with status 1.
    pub failing: Vec<String>,
    /// Programs that cannot be started at all.
    pub unavailable: Vec<String>,
}

impl RecordingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(program: &str) -> Self {
        Self { failing: vec![program.to_string()], ..Default::default() }
    }

    pub fn unavailable(program: &str) -> Self {
        Self { unavailable: vec![program.to_string()], ..Default::default() }
    }

    pub fn programs(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl Environment for RecordingEnvironment {
    fn file_exists(&self, path: &Path) -> bool {
        SystemEnvironment.file_exists(path)
    }

    fn make_dirs(&self, paths: &[PathBuf]) -> Result<()> {
        SystemEnvironment.make_dirs(paths)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        SystemEnvironment.copy_file(src, dst)
    }

    fn run_process(&self, command: &ProcessCommand) -> Result<ProcessOutput> {
        self.commands.borrow_mut().push(command.clone());
        if self.unavailable.contains(&command.program) {
            let source = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
            return Err(Error::io(&command.program, source));
        }
        let status = if self.failing.contains(&command.program) { 1 } else { 0 };
        Ok(ProcessOutput { status: Some(status), stdout: String::new(), stderr: "boom".into() })
    }
}

/// Answers questions from a script, in order.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    confirmations: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(self, inputs: &[&str]) -> Self {
        self.inputs.borrow_mut().extend(inputs.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_selections(self, selections: &[usize]) -> Self {
        self.selections.borrow_mut().extend(selections.iter().copied());
        self
    }

    pub fn with_confirmations(self, confirmations: &[bool]) -> Self {
        self.confirmations.borrow_mut().extend(confirmations.iter().copied());
        self
    }

    fn exhausted(prompt: &str) -> Error {
        Error::PromptError(format!("no scripted answer for '{prompt}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let answer = self.inputs.borrow_mut().pop_front().ok_or_else(|| Self::exhausted(prompt))?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    fn select(&self, prompt: &str, _items: &[&str], default: usize) -> Result<usize> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.selections.borrow_mut().pop_front().unwrap_or(default))
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.confirmations.borrow_mut().pop_front().ok_or_else(|| Self::exhausted(prompt))
    }
}
