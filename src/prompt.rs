use std::io::{BufRead, Write};

use console::style;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::error::Error;

/// Question asked before history is rewritten.
pub const CONFIRM_PROMPT: &str =
    "Do you really want to remove this file from the Git history? (yes/no)";

/// Message shown when an answer is neither yes nor no.
pub const RETRY_MESSAGE: &str = "Please answer 'yes' or 'no'.";

/// Abstraction over a line-oriented question.
///
/// Decouples the confirmation loop from where answers come from, so the
/// loop can be driven by a terminal, a pipe or a scripted test double.
pub trait LinePrompter {
    /// Shows `prompt` and reads one line of input.
    ///
    /// # Returns
    /// `Ok(Some(line))` with the raw line, `Ok(None)` once input is
    /// exhausted, or `Err(String)` describing a read failure.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, String>;

    /// Tells the user their last answer was not understood.
    fn retry(&mut self, message: &str);
}

/// `LinePrompter` backed by `dialoguer::Input` for interactive terminals.
///
/// Uses the `ColorfulTheme` for user-friendly styling.
pub struct DialoguerLinePrompter;

impl LinePrompter for DialoguerLinePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        match input.interact_text() {
            Ok(v) => Ok(Some(v)),
            Err(e) => Err(e.to_string()),
        }
    }

    fn retry(&mut self, message: &str) {
        println!("{}", style(message).yellow());
    }
}

/// `LinePrompter` over any buffered reader and writer, used when standard
/// input is not a terminal.
pub struct ReaderLinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ReaderLinePrompter<R, W> {
    /// Wraps an input/output pair.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LinePrompter for ReaderLinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, String> {
        write!(self.output, "{prompt}: ").map_err(|e| e.to_string())?;
        self.output.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(e) => Err(e.to_string()),
        }
    }

    fn retry(&mut self, message: &str) {
        // A broken output stream surfaces on the next prompt write.
        let _ = writeln!(self.output, "{message}");
    }
}

/// Interprets one answer: trimmed and case-insensitive `yes`/`y` or `no`/`n`.
///
/// Returns `None` for anything else.
pub fn parse_answer(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Asks whether to rewrite history until a yes or no answer arrives.
///
/// There is no retry limit. Running out of input is [`Error::InputClosed`].
pub fn confirm_removal<P: LinePrompter>(prompter: &mut P) -> Result<bool, Error> {
    loop {
        let line = prompter.read_line(CONFIRM_PROMPT).map_err(Error::Prompt)?;
        let Some(line) = line else {
            return Err(Error::InputClosed);
        };
        match parse_answer(&line) {
            Some(answer) => {
                tracing::info!(answer, "confirmation received");
                return Ok(answer);
            }
            None => {
                tracing::debug!(input = line.trim(), "unrecognised answer");
                prompter.retry(RETRY_MESSAGE);
            }
        }
    }
}
