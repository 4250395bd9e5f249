use anyhow::{Context, Result};
use std::{
    path::Path,
    process::{Command, Stdio},
};

pub struct CommandOutput {
    pub stdout: String,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run a collaborator and capture its stdout. `command` may carry leading
/// arguments of its own (`"vcsstatus --quiet"`); `args` are appended.
///
/// Only a failure to start the process is an error. A non-zero exit is
/// reported through [`CommandOutput::code`].
pub fn run(command: &str, dir: Option<&Path>, args: &[&str]) -> Result<CommandOutput> {
    let mut words = command.split_whitespace();
    let program = words
        .next()
        .with_context(|| format!("empty command {:?}", command))?;

    let mut cmd = Command::new(program);
    cmd.args(words)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .with_context(|| format!("failed to run {}", program))?;
    log::debug!("{} exited with {:?}", program, output.status.code());

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        code: output.status.code(),
    })
}
