#![allow(dead_code)]

use async_trait::async_trait;
use pyboot::runner::{ProcessRunner, RunOutput, ServiceExit};
use std::io;
use std::path::Path;
use std::sync::Mutex;

type Handler = Box<dyn Fn(&str, &[&str], &Path) -> io::Result<RunOutput> + Send + Sync>;

/// Process runner test double: every invocation is recorded, responses come
/// from a canned handler, and foreground spawns return a fixed exit.
pub struct ScriptedRunner {
    handler: Handler,
    pub calls: Mutex<Vec<String>>,
    pub launches: Mutex<Vec<String>>,
    pub service_exit: ServiceExit,
}

impl ScriptedRunner {
    pub fn new(
        handler: impl Fn(&str, &[&str], &Path) -> io::Result<RunOutput> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            launches: Mutex::new(Vec::new()),
            service_exit: ServiceExit { code: Some(0) },
        }
    }

    pub fn with_service_exit(mut self, code: Option<i32>) -> Self {
        self.service_exit = ServiceExit { code };
        self
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn recorded_launches(&self) -> Vec<String> {
        self.launches.lock().unwrap().clone()
    }

    pub fn venv_create_count(&self) -> usize {
        self.recorded_calls()
            .iter()
            .filter(|call| call.contains("-m venv"))
            .count()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<RunOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")));
        (self.handler)(program, args, cwd)
    }

    async fn spawn_foreground(
        &self,
        program: &str,
        args: &[&str],
        _cwd: &Path,
    ) -> io::Result<ServiceExit> {
        self.launches
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")));
        Ok(self.service_exit)
    }
}

pub fn ok(stdout: &str) -> io::Result<RunOutput> {
    Ok(RunOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

pub fn failed(code: i32, stderr: &str) -> io::Result<RunOutput> {
    Ok(RunOutput {
        code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    })
}

pub fn not_found() -> io::Result<RunOutput> {
    Err(io::Error::new(io::ErrorKind::NotFound, "program not found"))
}

/// Write the three required service files into `root`.
pub fn provision_tree(root: &Path) {
    std::fs::create_dir_all(root.join("templates")).unwrap();
    std::fs::write(root.join("requirements.txt"), "flask==3.0.0\npsutil\n").unwrap();
    std::fs::write(root.join("cmd_manager.py"), "# service entry point\n").unwrap();
    std::fs::write(root.join("templates/index.html"), "<html></html>\n").unwrap();
}

/// Lay out a structurally complete virtual environment at `root`.
pub fn fake_venv_layout(root: &Path) {
    let bin = if cfg!(windows) { "Scripts" } else { "bin" };
    let activate = if cfg!(windows) {
        "activate.bat"
    } else {
        "activate"
    };
    let python = if cfg!(windows) {
        "python.exe"
    } else {
        "python"
    };
    std::fs::create_dir_all(root.join(bin)).unwrap();
    std::fs::write(root.join(bin).join(activate), "# activation script\n").unwrap();
    std::fs::write(root.join(bin).join(python), "").unwrap();
}

/// Handler emulating a healthy host: the runtime and pip answer, venv
/// creation lays out a complete environment, every install succeeds.
pub fn healthy_host() -> impl Fn(&str, &[&str], &Path) -> io::Result<RunOutput> + Send + Sync + 'static
{
    move |_program, args, _cwd| match args {
        ["--version"] => ok("Python 3.11.4"),
        ["-m", "pip", "--version"] => ok("pip 24.0"),
        ["-m", "venv", path] => {
            fake_venv_layout(Path::new(path));
            ok("")
        }
        ["-m", "pip", "install", ..] => ok(""),
        ["-m", "ensurepip", ..] => ok(""),
        _ => ok(""),
    }
}
