use crate::error::{Error, Result};
use crate::output::Reporter;
use crate::plan::{LaunchPlan, MANIFEST_FILE};
use crate::runner::ProcessRunner;
use crate::venv::Venv;

/// Install the dependency manifest into the environment.
///
/// pip upgrades itself first on a best-effort basis: a stale pip can still
/// install the manifest, so that failure is logged and tolerated. A failing
/// manifest install is fatal.
pub async fn install(
    plan: &LaunchPlan,
    venv: &Venv,
    runner: &dyn ProcessRunner,
    out: &dyn Reporter,
) -> Result<()> {
    let python = venv.python();
    let python = python.to_string_lossy();

    out.progress("Upgrading pip: ");
    match runner
        .run(
            &python,
            &["-m", "pip", "install", "--upgrade", "pip"],
            &plan.work_dir,
        )
        .await
    {
        Ok(output) if output.success() => out.finish_progress("done"),
        Ok(output) => {
            out.finish_progress("skipped");
            tracing::debug!(
                "pip self-upgrade failed: {}",
                output.first_error_line().unwrap_or("nonzero exit")
            );
        }
        Err(e) => {
            out.finish_progress("skipped");
            tracing::debug!("pip self-upgrade failed: {}", e);
        }
    }

    out.status(&format!("Installing dependencies from {}", MANIFEST_FILE));
    match runner
        .run(
            &python,
            &["-m", "pip", "install", "-r", MANIFEST_FILE],
            &plan.work_dir,
        )
        .await
    {
        Ok(output) if output.success() => {
            out.success("Dependencies installed");
            Ok(())
        }
        Ok(output) => Err(Error::DependencyInstall(
            output
                .first_error_line()
                .unwrap_or("pip exited with a nonzero status")
                .to_string(),
        )),
        Err(e) => Err(Error::DependencyInstall(e.to_string())),
    }
}
