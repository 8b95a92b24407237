use crate::error::{Error, Result};
use crate::output::Reporter;
use crate::plan::LaunchPlan;
use crate::probe::python_command;
use crate::runner::ProcessRunner;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Layout of the managed virtual environment.
#[derive(Debug, Clone)]
pub struct Venv {
    pub root: PathBuf,
    /// True when this run deleted and recreated a corrupt environment.
    pub rebuilt: bool,
}

impl Venv {
    /// Path to the environment's own interpreter. Subsequent steps invoke
    /// this binary directly instead of sourcing an activation script.
    pub fn python(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts").join("python.exe")
        } else {
            self.root.join("bin").join("python")
        }
    }

    fn activation_script(root: &Path) -> PathBuf {
        if cfg!(windows) {
            root.join("Scripts").join("activate.bat")
        } else {
            root.join("bin").join("activate")
        }
    }

    /// An environment directory without its activation entry point is a
    /// leftover from an interrupted create. Half-built environments are not
    /// patched incrementally; the whole tree is rebuilt.
    pub fn is_corrupt(root: &Path, ws: &dyn Workspace) -> bool {
        ws.exists(root) && !ws.exists(&Self::activation_script(root))
    }
}

/// Create or reuse the virtual environment, rebuilding a corrupt one exactly
/// once, then verify its interpreter runs.
pub async fn ensure(
    plan: &LaunchPlan,
    runner: &dyn ProcessRunner,
    ws: &dyn Workspace,
    out: &dyn Reporter,
) -> Result<Venv> {
    let root = plan.venv_root();
    let mut rebuilt = false;

    if ws.exists(&root) {
        if Venv::is_corrupt(&root, ws) {
            out.warning(&format!(
                "Virtual environment at {} is incomplete (activation entry missing); rebuilding",
                root.display()
            ));
            ws.remove_tree(&root).map_err(|e| {
                Error::VenvCreation(format!("could not remove the corrupt environment: {}", e))
            })?;
            rebuilt = true;
        } else {
            out.status("Reusing existing virtual environment");
        }
    }

    if !ws.exists(&root) {
        out.status(&format!(
            "Creating virtual environment at {}",
            root.display()
        ));
        let root_arg = root.to_string_lossy();
        match runner
            .run(python_command(), &["-m", "venv", &root_arg], &plan.work_dir)
            .await
        {
            Ok(output) if output.success() => {}
            Ok(output) => {
                return Err(Error::VenvCreation(
                    output
                        .first_error_line()
                        .unwrap_or("python -m venv exited with a nonzero status")
                        .to_string(),
                ))
            }
            Err(e) => return Err(Error::VenvCreation(e.to_string())),
        }
    }

    let venv = Venv { root, rebuilt };

    // No install step can succeed with a broken interpreter, so this failure
    // is fatal rather than another rebuild trigger.
    let python = venv.python();
    let python_arg = python.to_string_lossy();
    match runner.run(&python_arg, &["--version"], &plan.work_dir).await {
        Ok(output) if output.success() => Ok(venv),
        Ok(output) => Err(Error::VenvActivation(
            output
                .first_error_line()
                .unwrap_or("interpreter exited with a nonzero status")
                .to_string(),
        )),
        Err(e) => Err(Error::VenvActivation(e.to_string())),
    }
}
