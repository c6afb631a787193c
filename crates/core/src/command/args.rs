//! Splitting of a flat cargo argument vector into command, options and arguments

use serde::{Deserialize, Serialize};

/// The separator between cargo's own flags and the arguments passed to the test binary
pub const SEPARATOR: &str = "--";

/// A cargo argument vector split into its three parts.
///
/// `cargo test --all --release -- --nocapture my_test` becomes
/// `command = "test"`, `options = ["--all", "--release"]` and
/// `arguments = ["--nocapture", "my_test"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArguments {
    pub command: String,
    pub options: Vec<String>,
    pub arguments: Vec<String>,
}

impl ParsedArguments {
    /// Classify `tokens` into command, options and arguments.
    ///
    /// Flags in front of the command are dropped. Only the first `--` acts as the
    /// separator; any later `--` stays in `arguments` verbatim. This never fails.
    pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Self {
        let Some(command_index) = tokens.iter().position(|t| !t.as_ref().starts_with('-'))
        else {
            return Self::default();
        };

        let command = tokens[command_index].as_ref().to_string();
        let first_option = command_index + 1;

        let (options, arguments) = match tokens.iter().position(|t| t.as_ref() == SEPARATOR) {
            None => (to_owned(&tokens[first_option..]), Vec::new()),
            // A separator among the leading flags went away with them
            Some(separator) if separator < command_index => {
                (Vec::new(), to_owned(&tokens[first_option..]))
            }
            Some(separator) => (
                to_owned(&tokens[first_option..separator]),
                to_owned(&tokens[separator + 1..]),
            ),
        };

        Self {
            command,
            options,
            arguments,
        }
    }

    /// Rebuild the meaningful tokens: command, options, then `--` and the arguments
    /// when there are any.
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(2 + self.options.len() + self.arguments.len());
        if !self.command.is_empty() {
            tokens.push(self.command.clone());
        }
        tokens.extend(self.options.iter().cloned());
        if !self.arguments.is_empty() {
            tokens.push(SEPARATOR.to_string());
            tokens.extend(self.arguments.iter().cloned());
        }
        tokens
    }

    /// Options and arguments that contain whitespace. These do not survive the
    /// space-joined stored form as single tokens.
    pub fn tokens_with_whitespace(&self) -> Vec<&str> {
        self.options
            .iter()
            .chain(&self.arguments)
            .map(String::as_str)
            .filter(|token| token.contains(char::is_whitespace))
            .collect()
    }

    /// Options joined with single spaces, the form stored in launch configurations
    pub fn options_string(&self) -> String {
        self.options.join(" ")
    }

    /// Arguments joined with single spaces, the form stored in launch configurations
    pub fn arguments_string(&self) -> String {
        self.arguments.join(" ")
    }
}

fn to_owned<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|t| t.as_ref().to_string()).collect()
}
