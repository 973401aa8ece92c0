//! The generator's view of the host system: filesystem checks and external
//! commands. The generator never touches the host other than through
//! [`Environment`], which keeps it testable with a recording double.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::constants::FWCONSOLE;
use crate::error::{Error, Result};

/// A command line to run on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessCommand {
    pub fn new<S: AsRef<str>>(program: impl Into<String>, args: &[S]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.as_ref().to_string()).collect(),
        }
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What an external command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Exit status recorded for a command that could not be started, as a
/// shell reports a missing program.
pub const NOT_STARTED_STATUS: i32 = 127;

impl ProcessOutput {
    /// Outcome of a command whose spawn failed with `err`.
    pub fn not_started(err: &Error) -> Self {
        Self { status: Some(NOT_STARTED_STATUS), stdout: String::new(), stderr: err.to_string() }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Human readable exit status.
    pub fn status_text(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Host capabilities the generator depends on.
pub trait Environment {
    fn file_exists(&self, path: &Path) -> bool;

    /// Creates every directory in `paths`, parents included.
    fn make_dirs(&self, paths: &[PathBuf]) -> Result<()>;

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Runs `command` to completion. A non-zero exit is not an error here;
    /// callers decide what it means.
    fn run_process(&self, command: &ProcessCommand) -> Result<ProcessOutput>;

    /// Recursively hands `path` to `owner` (`user:group`).
    fn set_owner(&self, path: &Path, owner: &str) -> Result<ProcessOutput> {
        let path = path.display().to_string();
        self.run_process(&ProcessCommand::new("chown", &["-R", owner, path.as_str()]))
    }

    /// Asks the host's module registry to install `rawname`.
    fn install_module(&self, rawname: &str) -> Result<ProcessOutput> {
        self.run_process(&ProcessCommand::new(FWCONSOLE, &["ma", "install", rawname]))
    }

    /// Asks the host to reload its configuration.
    fn reload_modules(&self) -> Result<ProcessOutput> {
        self.run_process(&ProcessCommand::new(FWCONSOLE, &["reload"]))
    }
}

/// [`Environment`] backed by the local filesystem and process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn make_dirs(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            debug!("Creating directory '{}'.", path.display());
            fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        debug!("Copying '{}' to '{}'.", src.display(), dst.display());
        fs::copy(src, dst).map(|_| ()).map_err(|e| Error::io(dst, e))
    }

    fn run_process(&self, command: &ProcessCommand) -> Result<ProcessOutput> {
        debug!("Running '{command}'.");
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::io(&command.program, e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes at once; a full pipe would block the child.
        let (stdout, stderr) = thread::scope(|scope| {
            let errors = scope.spawn(move || stderr.map(|pipe| tee(pipe, io::stderr())));
            let out = stdout.map(|pipe| tee(pipe, io::stdout()));
            let err = errors
                .join()
                .unwrap_or_else(|_| Some(Err(io::Error::other("stderr reader panicked"))));
            (out, err)
        });

        let status = child.wait().map_err(|e| Error::io(&command.program, e))?;
        let captured = |stream: Option<io::Result<String>>| {
            stream
                .transpose()
                .map(Option::unwrap_or_default)
                .map_err(|e| Error::io(&command.program, e))
        };

        Ok(ProcessOutput {
            status: status.code(),
            stdout: captured(stdout)?,
            stderr: captured(stderr)?,
        })
    }
}

/// Copies `pipe` to `sink` line by line as it arrives and returns everything
/// read.
pub fn tee<R: Read, W: Write>(pipe: R, mut sink: W) -> io::Result<String> {
    let mut reader = BufReader::new(pipe);
    let mut captured = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        sink.write_all(&line)?;
        sink.flush()?;
        captured.push_str(&String::from_utf8_lossy(&line));
    }

    Ok(captured)
}
