//! Interactive collection of configuration values and user substitutes.

use mantis2github::{ConfigError, SubstituteProvider, User};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Prints `message` and reads one trimmed line from stdin.
///
/// Returns an empty string at end of input.
pub fn prompt_line(message: &str) -> Result<String, ConfigError> {
    print!("{message}: ");
    io::stdout().flush().map_err(stdin_error)?;

    let mut buffer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(stdin_error)?;
    Ok(buffer.trim().to_string())
}

/// Returns `value` if it is non-blank, otherwise asks for it.
///
/// Without `interactive`, a missing value is a [`ConfigError::MissingValue`].
pub fn value_or_prompt(
    value: Option<String>,
    name: &'static str,
    message: &str,
    interactive: bool,
) -> Result<String, ConfigError> {
    match value.filter(|value| !value.trim().is_empty()) {
        Some(value) => Ok(value),
        None if interactive => {
            let answer = prompt_line(message)?;
            if answer.is_empty() {
                return Err(ConfigError::MissingValue { name });
            }
            Ok(answer)
        }
        None => Err(ConfigError::MissingValue { name }),
    }
}

fn stdin_error(source: io::Error) -> ConfigError {
    ConfigError::IoError {
        path: "<stdin>".to_string(),
        source,
    }
}

/// Answers from a substitutes file first, then from the operator.
pub struct InteractiveSubstitutes {
    known: HashMap<u64, String>,
    interactive: bool,
}

impl InteractiveSubstitutes {
    /// Creates a provider backed by `known`, prompting for the rest when
    /// `interactive` is set.
    pub fn new(known: HashMap<u64, String>, interactive: bool) -> Self {
        Self { known, interactive }
    }
}

impl SubstituteProvider for InteractiveSubstitutes {
    fn substitute(&mut self, user: &User) -> Option<String> {
        if let Some(login) = self.known.get(&user.id) {
            return Some(login.clone());
        }
        if !self.interactive {
            return None;
        }

        let label = if user.real_name.is_empty() {
            format!("{} (id {})", user.name, user.id)
        } else {
            format!("{} / {} (id {})", user.name, user.real_name, user.id)
        };
        match prompt_line(&format!(
            "GitHub login for Mantis user {label} (leave empty to skip)"
        )) {
            Ok(answer) if !answer.is_empty() => Some(answer),
            Ok(_) => None,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Failed to read substitute");
                None
            }
        }
    }
}
