use crate::error::{Error, Result};
use crate::output::Reporter;
use crate::runner::{ProcessRunner, RunOutput};
use std::path::Path;

/// Result of a successful runtime probe.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    /// Trimmed version banner, e.g. "Python 3.11.4".
    pub version: String,
}

/// Name of the host interpreter command. The `python3` alias does not exist
/// on stock Windows installs.
pub fn python_command() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Python 2.x printed its version banner to stderr; take whichever stream is
/// nonempty so ancient interpreters still get identified before we reject them.
fn version_line(output: &RunOutput) -> String {
    let line = if output.stdout.trim().is_empty() {
        output.stderr.trim()
    } else {
        output.stdout.trim()
    };
    line.lines().next().unwrap_or_default().to_string()
}

/// Verify the Python runtime and its package manager are callable.
///
/// A missing pip gets exactly one self-repair attempt via `ensurepip` before
/// the probe fails.
pub async fn probe(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    out: &dyn Reporter,
) -> Result<RuntimeInfo> {
    let python = python_command();

    out.progress("Python runtime: ");
    let version = match runner.run(python, &["--version"], work_dir).await {
        Ok(output) if output.success() => {
            let line = version_line(&output);
            out.finish_progress(&line);
            line
        }
        _ => {
            out.finish_progress("not found");
            return Err(Error::MissingRuntime);
        }
    };

    out.progress("pip: ");
    match runner.run(python, &["-m", "pip", "--version"], work_dir).await {
        Ok(output) if output.success() => {
            out.finish_progress(&version_line(&output));
        }
        _ => {
            out.finish_progress("missing, bootstrapping via ensurepip");
            let repaired = matches!(
                runner
                    .run(python, &["-m", "ensurepip", "--upgrade"], work_dir)
                    .await,
                Ok(output) if output.success()
            );
            let confirmed = repaired
                && matches!(
                    runner.run(python, &["-m", "pip", "--version"], work_dir).await,
                    Ok(output) if output.success()
                );
            if !confirmed {
                return Err(Error::MissingPackageManager);
            }
            out.status("pip bootstrapped");
        }
    }

    Ok(RuntimeInfo { version })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_prefers_stdout() {
        let output = RunOutput {
            code: Some(0),
            stdout: "Python 3.11.4\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(version_line(&output), "Python 3.11.4");
    }

    #[test]
    fn version_line_falls_back_to_stderr() {
        let output = RunOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: "Python 2.7.18\n".to_string(),
        };
        assert_eq!(version_line(&output), "Python 2.7.18");
    }
}
