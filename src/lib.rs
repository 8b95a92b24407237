//! # pyboot
//!
//! A bootstrap-and-launch orchestrator for the CMD manager web service.
//!
//! pyboot verifies the Python runtime, provisions an isolated virtual
//! environment, installs the declared dependency manifest, checks operational
//! preconditions (required files, directories, a free port), and then launches
//! the service as a supervised foreground child process.
//!
//! ## Pipeline
//!
//! The pipeline is an ordered sequence of gates. A hard failure at any gate
//! aborts the run with a diagnosis and a remediation hint; soft findings (a
//! port already in use) are recorded as warnings and the run continues.
//!
//! ```no_run
//! use pyboot::output::ConsoleReporter;
//! use pyboot::runner::SystemRunner;
//! use pyboot::workspace::DiskWorkspace;
//! use pyboot::{LaunchPlan, Pipeline};
//!
//! # async fn example() -> pyboot::Result<()> {
//! let plan = LaunchPlan::new(std::env::current_dir()?);
//! let out = ConsoleReporter::new(true);
//! let report = Pipeline::new(&SystemRunner, &DiskWorkspace, &out)
//!     .run(&plan)
//!     .await?;
//! println!("service exited with {:?}", report.exit.code);
//! # Ok(())
//! # }
//! ```
//!
//! ## Capability Seams
//!
//! Foreign process invocation goes through [`runner::ProcessRunner`] and
//! filesystem checks through [`workspace::Workspace`], so tests substitute
//! canned exit codes and temp directories for the real system.

pub mod error;
pub mod host;
pub mod install;
pub mod launch;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod preflight;
pub mod probe;
pub mod runner;
pub mod venv;
pub mod workspace;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pipeline::{BootstrapContext, GateResult, Pipeline, PipelineReport};
pub use plan::LaunchPlan;
pub use runner::{ProcessRunner, RunOutput, ServiceExit, SystemRunner};
pub use venv::Venv;
