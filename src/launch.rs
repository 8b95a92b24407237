use crate::error::Result;
use crate::output::Reporter;
use crate::plan::{LaunchPlan, ENTRY_POINT, LOG_DIR};
use crate::runner::{ProcessRunner, ServiceExit};
use crate::venv::Venv;

/// Spawn the service as a foreground child and block until it exits.
///
/// No exit status is treated as catastrophic here; the orchestrator cannot
/// classify why a foreign process stopped, so every outcome flows into the
/// post-exit report.
pub async fn launch(
    plan: &LaunchPlan,
    venv: &Venv,
    runner: &dyn ProcessRunner,
    out: &dyn Reporter,
) -> Result<ServiceExit> {
    let python = venv.python();
    let python = python.to_string_lossy();

    let exit = runner
        .spawn_foreground(&python, &[ENTRY_POINT], &plan.work_dir)
        .await?;

    report_exit(plan, exit, out);
    Ok(exit)
}

fn report_exit(plan: &LaunchPlan, exit: ServiceExit, out: &dyn Reporter) {
    out.blank();
    match exit.code {
        Some(0) | None => {
            // A signal exit is the normal Ctrl-C shutdown path.
            out.success("Service stopped");
        }
        Some(code) => {
            out.warning(&format!("Service exited with code {}", code));
            out.status("If this was unexpected, check:");
            out.status(&format!("  - the service logs under {}/", LOG_DIR));
            out.status(&format!(
                "  - whether port {} was taken by another process",
                plan.port
            ));
            out.status("  - that the installed Python version matches what the service expects");
        }
    }
}
