use crate::error::{Error, Result};
use crate::output::Reporter;
use crate::pipeline::GateResult;
use crate::plan::LaunchPlan;
use crate::workspace::{EnsureOutcome, Workspace};
use std::net::TcpListener;

/// Check every required file and aggregate ALL missing names into a single
/// failure, so one run shows the complete remediation list.
pub fn check_files(plan: &LaunchPlan, ws: &dyn Workspace, out: &dyn Reporter) -> Result<()> {
    let mut missing = Vec::new();
    for (name, path) in plan.required_files() {
        out.progress(&format!("{}: ", name));
        if ws.exists(&path) {
            out.finish_progress("present");
        } else {
            out.finish_progress("MISSING");
            missing.push(name.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingRequiredFiles { names: missing })
    }
}

/// Ensure the log and template directories exist. Idempotent; an existing
/// directory is reported as already present, never re-created.
pub fn ensure_directories(plan: &LaunchPlan, ws: &dyn Workspace, out: &dyn Reporter) -> Result<()> {
    for (name, path) in plan.ensured_dirs() {
        match ws.ensure_dir(&path)? {
            EnsureOutcome::Created => out.status(&format!("Created directory {}/", name)),
            EnsureOutcome::AlreadyPresent => {
                out.status(&format!("Directory {}/ already present", name))
            }
        }
    }
    Ok(())
}

/// Check whether the service port is already bound.
///
/// A listener is a warning, never a hard failure: the port may belong to a
/// previous instance of the same service that the user intends to replace.
pub fn check_port(port: u16) -> GateResult {
    // Bind both addresses: on macOS the loopback bind can succeed while the
    // wildcard address is taken.
    let loopback_free = TcpListener::bind(("127.0.0.1", port)).is_ok();
    let wildcard_free = TcpListener::bind(("0.0.0.0", port)).is_ok();
    if loopback_free && wildcard_free {
        return GateResult::Continue;
    }

    let message = match find_listener(port) {
        Some(listener) => format!(
            "Port {} is already in use by '{}' (PID {}); the service will fail to bind unless that process stops",
            port, listener.name, listener.pid
        ),
        None => format!(
            "Port {} is already in use; the listener may be a previous instance of the service",
            port
        ),
    };
    GateResult::Warn(message)
}

struct ListenerInfo {
    pid: u32,
    name: String,
}

#[cfg(target_os = "linux")]
fn find_listener(port: u16) -> Option<ListenerInfo> {
    let output = std::process::Command::new("ss")
        .args(["-tlnp", &format!("sport = :{}", port)])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().skip(1) {
        let Some(users_part) = line.split_whitespace().last() else {
            continue;
        };
        for part in users_part.split(',') {
            if let Some(pid_str) = part.strip_prefix("pid=") {
                if let Ok(pid) = pid_str.parse::<u32>() {
                    let name = std::fs::read_to_string(format!("/proc/{}/comm", pid))
                        .map(|s| s.trim().to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    return Some(ListenerInfo { pid, name });
                }
            }
        }
    }
    None
}

#[cfg(target_os = "macos")]
fn find_listener(port: u16) -> Option<ListenerInfo> {
    let output = std::process::Command::new("lsof")
        .args(["-i", &format!(":{}", port), "-P", "-n", "-F", "pcn"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    // lsof field format: pPID, cCOMMAND, nNAME
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut pid: Option<u32> = None;
    let mut name: Option<String> = None;
    for line in stdout.lines() {
        if let Some(stripped) = line.strip_prefix('p') {
            if pid.is_some() {
                break;
            }
            pid = stripped.parse::<u32>().ok();
        } else if let Some(stripped) = line.strip_prefix('c') {
            name = Some(stripped.to_string());
        }
    }
    pid.map(|pid| ListenerInfo {
        pid,
        name: name.unwrap_or_else(|| "unknown".to_string()),
    })
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn find_listener(_port: u16) -> Option<ListenerInfo> {
    None
}
