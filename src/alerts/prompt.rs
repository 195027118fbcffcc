//! Interactive action prompt

use std::io::{self, BufRead, Write};

use super::action::Action;

pub const PROMPT: &str = "Do you want to disable or enable the alerts? (type 'disable' or 'enable'): ";
pub const INVALID_INPUT: &str = "Invalid input. Please type 'disable' or 'enable'.";

/// Ask for the action on `output` and read one line from `input`
///
/// Returns `Ok(None)` after printing the rejection message when the line is
/// neither action; the caller should then stop without touching any alert.
pub fn prompt_action<R, W>(input: &mut R, output: &mut W) -> Result<Option<Action>, PromptError>
where
    R: BufRead,
    W: Write,
{
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof);
    }

    match Action::parse(&line) {
        Ok(action) => Ok(Some(action)),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected prompt input");
            writeln!(output, "{}", INVALID_INPUT)?;
            Ok(None)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No input received")]
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> (Result<Option<Action>, PromptError>, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_action(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_valid_input() {
        let (result, output) = prompt("  Enable \n");
        assert_eq!(result.unwrap(), Some(Action::Enable));
        assert_eq!(output, PROMPT);

        let (result, _) = prompt("DISABLE");
        assert_eq!(result.unwrap(), Some(Action::Disable));
    }

    #[test]
    fn test_invalid_input_prints_one_rejection() {
        for input in ["yes\n", "\n", "enabled\n", "off\n"] {
            let (result, output) = prompt(input);
            assert_eq!(result.unwrap(), None);
            let rejection = output.strip_prefix(PROMPT).unwrap();
            assert_eq!(rejection, format!("{}\n", INVALID_INPUT));
            assert_eq!(output.matches(INVALID_INPUT).count(), 1);
        }
    }

    #[test]
    fn test_only_first_line_is_read() {
        let (result, _) = prompt("nope\nenable\n");
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_eof() {
        let (result, _) = prompt("");
        assert!(matches!(result, Err(PromptError::Eof)));
    }
}
