use miette::Diagnostic;
use std::io;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Python runtime not found")]
    #[diagnostic(
        code(pyboot::runtime::missing),
        help("Install Python 3 from https://www.python.org/downloads/ and make sure `python3` is on your PATH")
    )]
    MissingRuntime,

    #[error("pip is not available in the detected Python installation")]
    #[diagnostic(
        code(pyboot::pip::missing),
        help("Reinstall Python with the bundled pip, or run `python3 -m ensurepip --upgrade` manually")
    )]
    MissingPackageManager,

    #[error("Required files are missing: {}", .names.join(", "))]
    #[diagnostic(
        code(pyboot::files::missing),
        help("Restore the listed files into the working directory, then run pyboot again")
    )]
    MissingRequiredFiles { names: Vec<String> },

    #[error("Failed to create the virtual environment: {0}")]
    #[diagnostic(
        code(pyboot::venv::create_failed),
        help("Check free disk space, write permissions on the working directory, and that your Python installation includes the `venv` module")
    )]
    VenvCreation(String),

    #[error("The virtual environment interpreter is not usable: {0}")]
    #[diagnostic(
        code(pyboot::venv::activate_failed),
        help("Delete the `venv` directory and run pyboot again to rebuild it from scratch")
    )]
    VenvActivation(String),

    #[error("Dependency installation failed: {0}")]
    #[diagnostic(
        code(pyboot::install::failed),
        help("Check your network connectivity, or retry against a mirror:\n\n    venv/bin/pip install -r requirements.txt -i https://pypi.tuna.tsinghua.edu.cn/simple")
    )]
    DependencyInstall(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns a remediation suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::MissingRuntime => Some(
                "Download Python 3 from https://www.python.org/downloads/ and ensure `python3` \
                 is on your PATH. On Debian/Ubuntu: apt install python3 python3-venv"
                    .to_string(),
            ),
            Error::MissingPackageManager => Some(
                "pip could not be bootstrapped. Reinstall Python with the bundled pip, or run:\n\
                 \n    python3 -m ensurepip --upgrade"
                    .to_string(),
            ),
            Error::MissingRequiredFiles { names } => Some(format!(
                "Restore the following files into the working directory:\n{}",
                names
                    .iter()
                    .map(|n| format!("  - {}", n))
                    .collect::<Vec<_>>()
                    .join("\n")
            )),
            Error::VenvCreation(_) => Some(
                "Virtual environment creation can fail due to:\n\
                 \x20 1. Insufficient disk space: df -h\n\
                 \x20 2. Missing write permission on the working directory\n\
                 \x20 3. A Python installation without the venv module (apt install python3-venv)"
                    .to_string(),
            ),
            Error::VenvActivation(_) => Some(
                "The environment directory exists but its interpreter does not run. \
                 Delete the `venv` directory and run pyboot again to rebuild it."
                    .to_string(),
            ),
            Error::DependencyInstall(_) => Some(
                "Verify network connectivity, or retry the install against a mirror:\n\
                 \n    venv/bin/pip install -r requirements.txt -i https://pypi.tuna.tsinghua.edu.cn/simple"
                    .to_string(),
            ),
            Error::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gate_failure_carries_a_suggestion() {
        let fatal = [
            Error::MissingRuntime,
            Error::MissingPackageManager,
            Error::MissingRequiredFiles {
                names: vec!["requirements.txt".into()],
            },
            Error::VenvCreation("disk full".into()),
            Error::VenvActivation("exec format error".into()),
            Error::DependencyInstall("pip exited with code 1".into()),
        ];
        for err in fatal {
            let suggestion = err.suggestion();
            assert!(
                suggestion.as_deref().is_some_and(|s| !s.is_empty()),
                "missing suggestion for {:?}",
                err
            );
        }
    }

    #[test]
    fn missing_files_error_names_every_file() {
        let err = Error::MissingRequiredFiles {
            names: vec!["requirements.txt".into(), "templates/index.html".into()],
        };
        let message = err.to_string();
        assert!(message.contains("requirements.txt"));
        assert!(message.contains("templates/index.html"));
    }
}
