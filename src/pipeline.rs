use crate::error::Result;
use crate::host::HostInfo;
use crate::output::Reporter;
use crate::plan::{LaunchPlan, LOG_DIR, MANIFEST_FILE};
use crate::runner::{ProcessRunner, ServiceExit};
use crate::workspace::Workspace;
use crate::{install, launch, preflight, probe, venv};

/// Outcome of one pipeline gate.
///
/// Hard failures travel through the `Result` channel; `Warn` is recorded and
/// the pipeline proceeds as if the gate had returned `Continue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    Continue,
    Warn(String),
}

/// State threaded through one bootstrap run. Owned exclusively by the
/// pipeline; never persisted.
#[derive(Debug)]
pub struct BootstrapContext {
    pub host: HostInfo,
    pub runtime_version: Option<String>,
    pub warnings: Vec<String>,
}

impl BootstrapContext {
    pub fn new(host: HostInfo) -> Self {
        Self {
            host,
            runtime_version: None,
            warnings: Vec::new(),
        }
    }

    /// Record a gate outcome; warnings accumulate, the pipeline continues.
    pub fn record(&mut self, gate: GateResult, out: &dyn Reporter) {
        if let GateResult::Warn(message) = gate {
            out.warning(&format!("Warning: {}", message));
            self.warnings.push(message);
        }
    }
}

/// What one completed run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub exit: ServiceExit,
    pub warnings: Vec<String>,
}

const BANNER_WIDTH: usize = 60;

/// The bootstrap pipeline: an ordered sequence of gates, each of which must
/// return `Continue` (or a recorded `Warn`) before the next one runs.
///
/// 1. Probe the Python runtime and pip
/// 2. Check required files, ensure directories, check the port
/// 3. Create or reuse the virtual environment
/// 4. Install the dependency manifest
/// 5. Launch the service and wait for it to exit
pub struct Pipeline<'a> {
    runner: &'a dyn ProcessRunner,
    workspace: &'a dyn Workspace,
    out: &'a dyn Reporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        workspace: &'a dyn Workspace,
        out: &'a dyn Reporter,
    ) -> Self {
        Self {
            runner,
            workspace,
            out,
        }
    }

    pub async fn run(&self, plan: &LaunchPlan) -> Result<PipelineReport> {
        let mut ctx = BootstrapContext::new(HostInfo::detect(plan.work_dir.clone()));
        self.print_header(&ctx);

        let runtime = probe::probe(self.runner, &plan.work_dir, self.out).await?;
        ctx.runtime_version = Some(runtime.version);

        preflight::check_files(plan, self.workspace, self.out)?;
        preflight::ensure_directories(plan, self.workspace, self.out)?;
        let gate = preflight::check_port(plan.port);
        ctx.record(gate, self.out);

        let venv = venv::ensure(plan, self.runner, self.workspace, self.out).await?;

        if plan.skip_install {
            self.out.status("Skipping dependency installation");
        } else {
            install::install(plan, &venv, self.runner, self.out).await?;
        }

        self.print_launch_summary(plan, &ctx);
        let exit = launch::launch(plan, &venv, self.runner, self.out).await?;
        self.print_final_summary(&ctx, exit);

        Ok(PipelineReport {
            exit,
            warnings: ctx.warnings,
        })
    }

    fn rule(&self) -> String {
        "=".repeat(BANNER_WIDTH)
    }

    fn print_header(&self, ctx: &BootstrapContext) {
        let out = self.out;
        out.status(&self.rule());
        out.status("Bootstrapping the CMD manager service");
        out.status(&self.rule());
        out.status(&format!("Host:       {} ({})", ctx.host.os, ctx.host.arch));
        out.status(&format!("User:       {}", ctx.host.user));
        out.status(&format!("Workdir:    {}", ctx.host.work_dir.display()));
        out.status(&format!(
            "Started:    {}",
            ctx.host.started_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.blank();
    }

    fn print_launch_summary(&self, plan: &LaunchPlan, ctx: &BootstrapContext) {
        let out = self.out;
        out.blank();
        out.status(&self.rule());
        out.status("Launching service");
        out.status(&self.rule());
        if let Some(ref version) = ctx.runtime_version {
            out.status(&format!("Runtime:    {}", version));
        }
        out.status(&format!("Web UI:     http://localhost:{}", plan.port));
        out.status(&format!("Manifest:   {}", plan.work_dir.join(MANIFEST_FILE).display()));
        out.status(&format!("Logs:       {}", plan.work_dir.join(LOG_DIR).display()));
        out.status("Press Ctrl+C to stop the service");
        out.status(&self.rule());
        out.blank();
    }

    fn print_final_summary(&self, ctx: &BootstrapContext, exit: ServiceExit) {
        let out = self.out;
        if ctx.warnings.is_empty() {
            if exit.success() || exit.code.is_none() {
                out.success("Bootstrap run complete");
            }
            return;
        }
        out.blank();
        out.status(&format!(
            "Run finished with {} warning(s):",
            ctx.warnings.len()
        ));
        for warning in &ctx.warnings {
            out.warning(&format!("  - {}", warning));
        }
    }
}
