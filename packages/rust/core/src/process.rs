//! External tool invocation.
//!
//! Paper conversion and API generation shell out to other programs. They go
//! through [`ToolRunner`] so the surrounding copy logic can be exercised
//! without those programs installed.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use docsplice_shared::{DocspliceError, Result};

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Directory the command runs in (inherits ours when `None`).
    pub working_dir: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Runs external commands to completion.
pub trait ToolRunner {
    /// Run `invocation`, failing unless it exits successfully.
    fn run(&self, invocation: &ToolInvocation) -> Result<()>;
}

/// Spawns real processes with inherited stdio.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        info!(
            program = %invocation.program,
            args = ?invocation.args,
            cwd = ?invocation.working_dir,
            "running external tool"
        );

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| DocspliceError::ToolSpawn {
            program: invocation.program.clone(),
            source: e,
        })?;

        if !status.success() {
            return Err(DocspliceError::ExternalTool {
                program: invocation.program.clone(),
                code: status.code(),
            });
        }

        debug!(program = %invocation.program, "external tool finished");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Records invocations and optionally runs a hook to fake tool output.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub calls: RefCell<Vec<ToolInvocation>>,
        pub fail_on: Option<usize>,
        pub on_run: Option<Box<dyn Fn(&ToolInvocation)>>,
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, invocation: &ToolInvocation) -> Result<()> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push(invocation.clone());
            if self.fail_on == Some(index) {
                return Err(DocspliceError::ExternalTool {
                    program: invocation.program.clone(),
                    code: Some(1),
                });
            }
            if let Some(hook) = &self.on_run {
                hook(invocation);
            }
            Ok(())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_command() {
        let inv = ToolInvocation::new("sh", ["-c", "exit 0"]);
        assert!(SystemRunner.run(&inv).is_ok());
    }

    #[test]
    fn non_zero_exit_is_external_tool_error() {
        let inv = ToolInvocation::new("sh", ["-c", "exit 3"]);
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(
            err,
            DocspliceError::ExternalTool { code: Some(3), .. }
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let inv = ToolInvocation::new("docsplice-no-such-tool", Vec::<String>::new());
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(err, DocspliceError::ToolSpawn { .. }));
    }

    #[test]
    fn runs_in_working_dir() {
        let dir = std::env::temp_dir().canonicalize().unwrap();
        let script = format!("test \"$(pwd -P)\" = '{}'", dir.display());
        let inv = ToolInvocation::new("sh", ["-c".to_string(), script]).in_dir(&dir);
        assert!(SystemRunner.run(&inv).is_ok());
    }
}
