use crate::models::smart::ControllerId;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    /// None when the process was terminated by a signal.
    pub status: Option<i32>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs an external program to completion and captures its output.
///
/// Collectors only ever talk to arcconf through this, so tests can feed them
/// canned text instead of spawning the real tool.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<ToolOutput>;
}

/// Spawns real processes via `std::process::Command`.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<ToolOutput> {
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            status: out.status.code(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  io::Error,
    },
    #[error("`{program} {command}` exited with {}", status_label(.status))]
    ExitStatus {
        program: String,
        command: String,
        status:  Option<i32>,
    },
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None       => "a signal".to_string(),
    }
}

/// Handle on the arcconf executable.
pub struct Arcconf<R: ToolRunner> {
    program: String,
    runner:  R,
}

impl Arcconf<SystemRunner> {
    pub fn system(program: impl Into<String>) -> Self {
        Self::new(program, SystemRunner)
    }
}

impl<R: ToolRunner> Arcconf<R> {
    pub fn new(program: impl Into<String>, runner: R) -> Self {
        Self { program: program.into(), runner }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `arcconf GETVERSION`: controller inventory.
    pub fn get_version(&self) -> Result<String, ToolError> {
        self.invoke(&["GETVERSION"])
    }

    /// `arcconf GETSMARTSTATS <id>`: SMART stats for every drive on a controller.
    pub fn get_smart_stats(&self, controller: ControllerId) -> Result<String, ToolError> {
        let id = controller.to_string();
        self.invoke(&["GETSMARTSTATS", &id])
    }

    fn invoke(&self, args: &[&str]) -> Result<String, ToolError> {
        log::debug!("running {} {}", self.program, args.join(" "));

        let out = self.runner
            .run(&self.program, args)
            .map_err(|source| ToolError::Spawn { program: self.program.clone(), source })?;

        if !out.success() {
            return Err(ToolError::ExitStatus {
                program: self.program.clone(),
                command: args.join(" "),
                status:  out.status,
            });
        }
        Ok(out.stdout)
    }
}
