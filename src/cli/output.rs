//! Result output
//!
//! stdout carries exactly the result lines; styling from `console` is
//! dropped automatically when stdout is not a terminal.

use console::style;

use crate::search::SearchResult;

/// Output handler for consistent CLI formatting
#[derive(Debug, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print a successful match
    pub fn found(&self, result: &SearchResult) {
        print!("{}", Self::render(result, |password| {
            style(password).green().bold().to_string()
        }));
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown
        eprintln!("{} {}", style("Error:").for_stderr().red().bold(), message);
    }

    fn render(result: &SearchResult, highlight: impl Fn(&str) -> String) -> String {
        let mut text = format!("Password matched: {}\n", highlight(&result.password));
        if let Some(attempts) = result.attempts {
            text.push_str(&format!("Combinations tried: {attempts}\n"));
        }
        text.push_str(&format!(
            "Time taken: {:.6} seconds\n",
            result.elapsed.as_secs_f64()
        ));
        text
    }
}
