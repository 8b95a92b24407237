use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyboot")]
#[command(about = "Bootstrap and launch the CMD manager web service")]
pub struct Cli {
    /// Working directory containing the service files (defaults to the current directory)
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Port the service is expected to bind (conflict check only)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Skip dependency installation (the environment must already be provisioned)
    #[arg(long)]
    pub skip_install: bool,

    /// Do not pause for Enter on fatal errors
    #[arg(short = 'y', long)]
    pub yes: bool,
}
