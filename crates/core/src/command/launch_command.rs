use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// A resolved process command line, ready to be rendered or spawned
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote(&self.program);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote(arg));
        }
        cmd
    }

    pub fn execute(&self) -> io::Result<ExitStatus> {
        if self.program.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "No command specified",
            ));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            tracing::debug!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        cmd.status()
    }
}

fn quote(arg: &str) -> String {
    if arg.contains(' ') {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_command_quotes_spaces() {
        let command = LaunchCommand::new(
            "cargo",
            vec![
                "test".to_string(),
                "--".to_string(),
                "my test".to_string(),
            ],
        );
        insta::assert_snapshot!(command.to_shell_command(), @"cargo test -- 'my test'");
    }

    #[test]
    fn test_builder_methods() {
        let command = LaunchCommand::new("cargo", vec!["run".to_string()])
            .with_working_dir(PathBuf::from("/work/foo"))
            .with_env("RUST_LOG".to_string(), "debug".to_string());

        assert_eq!(command.working_dir, Some(PathBuf::from("/work/foo")));
        assert_eq!(
            command.env,
            vec![("RUST_LOG".to_string(), "debug".to_string())]
        );
    }

    #[test]
    fn test_execute_without_program_fails() {
        let command = LaunchCommand::new("", vec![]);
        let err = command.execute().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
