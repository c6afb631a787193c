//! Decoding of run commands sent by a language server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// The command name rust-analyzer uses for "run this" code lenses
pub const RUN_SINGLE_COMMAND: &str = "rust-analyzer.runSingle";

/// A command as delivered by the language server protocol.
///
/// Only `arguments` is interpreted; its first element carries the run command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandInvocation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Value>>,
}

impl CommandInvocation {
    pub fn new(command: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            title: String::new(),
            command: command.into(),
            arguments: Some(arguments),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A fully decoded run command: the binary to invoke, its arguments and environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCommand {
    pub binary: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl RunCommand {
    /// Decode the first positional argument of `invocation`.
    ///
    /// Returns `None` for any payload that does not have the expected shape; a
    /// malformed command is never an error.
    pub fn decode(invocation: &CommandInvocation) -> Option<Self> {
        let first = invocation.arguments.as_ref()?.first();
        let decoded = first.and_then(Self::from_value);
        if decoded.is_none() {
            debug!(
                "Ignoring undecodable payload for command '{}'",
                invocation.command
            );
        }
        decoded
    }

    /// Decode a run command from a single JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let binary = object.get("binary").and_then(text)?;
        let args = object
            .get("args")?
            .as_array()?
            .iter()
            .filter_map(|arg| arg.as_str().map(str::to_string))
            .collect();
        let env = decode_env(object.get("env")?.as_object()?);

        Some(Self { binary, args, env })
    }

    /// The cargo subcommand, if any
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

fn decode_env(env: &Map<String, Value>) -> BTreeMap<String, String> {
    env.iter()
        .filter_map(|(key, value)| text(value).map(|value| (key.clone(), value)))
        .collect()
}

/// Textual form of a JSON value, `None` for null
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(arguments: Option<Vec<Value>>) -> CommandInvocation {
        CommandInvocation {
            title: "▶︎ Run Test".to_string(),
            command: RUN_SINGLE_COMMAND.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_decode_full_payload() {
        let payload = invocation(Some(vec![json!({
            "binary": "cargo",
            "args": ["test", "--package", "foo", "--lib", "--", "tests::it_works", "--exact"],
            "env": { "RUST_BACKTRACE": "short" }
        })]));

        let run = RunCommand::decode(&payload).unwrap();
        assert_eq!(run.binary, "cargo");
        assert_eq!(run.subcommand(), Some("test"));
        assert_eq!(run.args.len(), 7);
        assert_eq!(run.env.get("RUST_BACKTRACE").map(String::as_str), Some("short"));
    }

    #[test]
    fn test_missing_or_empty_positional_arguments() {
        assert_eq!(RunCommand::decode(&invocation(None)), None);
        assert_eq!(RunCommand::decode(&invocation(Some(vec![]))), None);
    }

    #[test]
    fn test_first_argument_must_be_an_object() {
        let payload = invocation(Some(vec![
            json!("cargo test"),
            json!({ "binary": "cargo", "args": [], "env": {} }),
        ]));
        assert_eq!(RunCommand::decode(&payload), None);
    }

    #[test]
    fn test_null_env_entries_are_dropped() {
        let payload = invocation(Some(vec![json!({
            "binary": "cargo",
            "args": ["test"],
            "env": { "RUST_BACKTRACE": "short", "BAD": null }
        })]));

        let run = RunCommand::decode(&payload).unwrap();
        assert_eq!(
            run.env,
            BTreeMap::from([("RUST_BACKTRACE".to_string(), "short".to_string())])
        );
    }

    #[test]
    fn test_each_field_is_required() {
        let missing_binary = json!({ "args": ["test"], "env": {} });
        let missing_args = json!({ "binary": "cargo", "env": {} });
        let missing_env = json!({ "binary": "cargo", "args": ["test"] });
        let null_binary = json!({ "binary": null, "args": ["test"], "env": {} });

        for value in [missing_binary, missing_args, missing_env, null_binary] {
            assert_eq!(RunCommand::from_value(&value), None, "value: {value}");
        }
    }

    #[test]
    fn test_wrongly_shaped_fields() {
        let args_not_array = json!({ "binary": "cargo", "args": "test", "env": {} });
        let env_not_object = json!({ "binary": "cargo", "args": ["test"], "env": ["A=1"] });

        assert_eq!(RunCommand::from_value(&args_not_array), None);
        assert_eq!(RunCommand::from_value(&env_not_object), None);
    }

    #[test]
    fn test_non_string_args_are_skipped_and_values_coerced() {
        let value = json!({
            "binary": 42,
            "args": ["test", 1, null, "--lib", { "x": 1 }],
            "env": { "RUST_TEST_THREADS": 1, "COLOR": true }
        });

        let run = RunCommand::from_value(&value).unwrap();
        assert_eq!(run.binary, "42");
        assert_eq!(run.args, vec!["test".to_string(), "--lib".to_string()]);
        assert_eq!(run.env.get("RUST_TEST_THREADS").map(String::as_str), Some("1"));
        assert_eq!(run.env.get("COLOR").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_invocation_from_json() {
        let json = r#"{
            "title": "Run",
            "command": "rust-analyzer.runSingle",
            "arguments": [{ "binary": "cargo", "args": ["test"], "env": {} }]
        }"#;

        let invocation = CommandInvocation::from_json(json).unwrap();
        let run = RunCommand::decode(&invocation).unwrap();
        assert_eq!(run.args, vec!["test".to_string()]);
        assert!(run.env.is_empty());
    }
}
