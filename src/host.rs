use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Host facts shown in the startup banner.
///
/// Populated exactly once before the pipeline runs and never re-read
/// mid-pipeline; none of these values participate in control flow.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub work_dir: PathBuf,
    pub user: String,
    pub started_at: DateTime<Local>,
}

impl HostInfo {
    pub fn detect(work_dir: PathBuf) -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            work_dir,
            user,
            started_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_populates_static_host_facts() {
        let info = HostInfo::detect(PathBuf::from("."));
        assert!(!info.os.is_empty());
        assert!(!info.arch.is_empty());
        assert!(!info.user.is_empty());
    }
}
