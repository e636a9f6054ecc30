//! Terminal implementation of the engine's user interface capability.

use async_trait::async_trait;
use healthbot_core::capabilities::{PromptError, UserInterface};
use std::collections::BTreeSet;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

pub struct ConsoleInterface {
    stdin: Mutex<BufReader<Stdin>>,
}

impl ConsoleInterface {
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn read_line(&self) -> Result<String, PromptError> {
        let mut line = String::new();
        let bytes = self.stdin.lock().await.read_line(&mut line).await?;
        if bytes == 0 {
            // EOF on stdin behaves like a user interrupt.
            return Err(PromptError::Interrupted);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn write_prompt(&self, description: &str) -> Result<(), PromptError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{description}")?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for ConsoleInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserInterface for ConsoleInterface {
    async fn prompt(&self, description: &str) -> Result<String, PromptError> {
        self.write_prompt(description)?;
        self.read_line().await
    }

    async fn prompt_multi_select(
        &self,
        description: &str,
        options: &[String],
    ) -> Result<BTreeSet<usize>, PromptError> {
        println!("{description}");
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {}", index + 1, option);
        }

        loop {
            self.write_prompt(
                "Enter the numbers of every answer that applies, separated by commas \
                 (or press Enter for none): ",
            )?;
            let line = self.read_line().await?;
            match parse_selection(&line, options.len()) {
                Ok(selected) => return Ok(selected),
                Err(message) => println!("{message}"),
            }
        }
    }

    async fn display(&self, text: &str) {
        println!("{text}");
    }
}

/// Parse comma-separated 1-based option numbers into a 0-based index set.
/// Empty input is a legal empty selection.
fn parse_selection(input: &str, option_count: usize) -> Result<BTreeSet<usize>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(BTreeSet::new());
    }

    let mut selected = BTreeSet::new();
    for part in trimmed.split(',') {
        let part = part.trim();
        let number: usize = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number. Please use the option numbers."))?;
        if number == 0 || number > option_count {
            return Err(format!(
                "Option {number} is not on the list. Please choose between 1 and {option_count}."
            ));
        }
        selected.insert(number - 1);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_empty_selection() {
        assert_eq!(parse_selection("", 4).unwrap(), BTreeSet::new());
        assert_eq!(parse_selection("   ", 4).unwrap(), BTreeSet::new());
    }

    #[test]
    fn comma_separated_numbers_become_zero_based_indices() {
        let selected = parse_selection("1, 3", 4).unwrap();
        assert_eq!(selected, BTreeSet::from([0, 2]));
    }

    #[test]
    fn duplicates_collapse_into_a_set() {
        let selected = parse_selection("2,2,2", 4).unwrap();
        assert_eq!(selected, BTreeSet::from([1]));
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert!(parse_selection("0", 4).is_err());
        assert!(parse_selection("5", 4).is_err());
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert!(parse_selection("one", 4).is_err());
        assert!(parse_selection("1, banana", 4).is_err());
    }
}
