//! modgen generates skeleton FreePBX modules.
//! It turns a handful of answers into a directory of token-substituted
//! source files and a `module.xml` manifest, then registers the module with
//! the host.

/// Preset answers from flags or stdin
pub mod answers;

/// Command-line interface module for the modgen application
pub mod cli;

/// Host configuration (~/.freepbxconfig) and module root resolution
pub mod config;

/// Common constants
pub mod constants;

/// The module descriptor and its closed value sets
pub mod descriptor;

/// Filesystem and process capabilities of the host
pub mod environment;

/// Error types and handling for the modgen application
pub mod error;

/// Orchestration of a generation run
pub mod generator;

/// Directory and file layout per module kind
pub mod layout;

/// Embedded and on-disk template resources
pub mod loader;

pub mod logger;

/// module.xml construction and serialization
pub mod manifest;

/// User input and interaction handling
pub mod prompt;

/// The question sequence producing a descriptor
pub mod questionnaire;

/// Token substitution and atomic file writes
pub mod template;
