use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Exit information read back from a supervised foreground child.
///
/// `code` is `None` when the child was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceExit {
    pub code: Option<i32>,
}

impl ServiceExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Captured result of a run-to-completion invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// First nonempty line of stderr, falling back to stdout, for one-line
    /// failure diagnostics.
    pub fn first_error_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Capability for invoking foreign executables.
///
/// Every external process the pipeline touches (the runtime probe, venv
/// creation, pip, the service itself) goes through this trait so tests can
/// substitute canned exit codes and output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a program to completion in `cwd`, capturing exit code and output.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<RunOutput>;

    /// Spawn a program as a foreground child inheriting the console, and
    /// block until it exits by any means.
    async fn spawn_foreground(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> io::Result<ServiceExit>;
}

/// Runs real processes via tokio.
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<RunOutput> {
        tracing::debug!("running: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn spawn_foreground(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> io::Result<ServiceExit> {
        tracing::debug!("spawning foreground: {} {}", program, args.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        // The terminal delivers Ctrl-C to the whole foreground process group,
        // so the child is already shutting down when we observe the signal.
        // We keep waiting so the post-exit report is always printed.
        loop {
            tokio::select! {
                status = child.wait() => {
                    let status = status?;
                    return Ok(ServiceExit { code: status.code() });
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("interrupt received, waiting for the service to stop");
                }
            }
        }
    }
}
