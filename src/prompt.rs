//! Terminal interaction.
//! The questionnaire talks to the operator only through [`Prompter`], so it
//! can be driven by a script in tests.

use crate::error::Result;
use dialoguer::{Confirm, Input, Select};

/// Trait for asking the operator questions.
pub trait Prompter {
    /// Free text answer, `default` when left empty.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// [`Prompter`] backed by `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(answer)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        let selection =
            Select::new().with_prompt(prompt).default(default).items(items).interact()?;
        Ok(selection)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::new().with_prompt(prompt).default(default).interact()?;
        Ok(answer)
    }
}
