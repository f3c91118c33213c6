//! External compiler collaborator
//!
//! Source units are turned into compiled units by an external program
//! (`javac` by default). The compiler is a trait so tests and embedders can
//! substitute their own; the default implementation runs a subprocess with a
//! bounded wall-clock timeout.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default wall-clock limit for one compiler invocation
pub const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 60;

/// Result from running the compiler on one source file
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Process exit code (None when killed or never started)
    pub return_code: Option<i32>,
    /// Captured standard error, for diagnostics
    pub stderr: String,
    /// Whether the compiler was killed after the timeout
    pub timed_out: bool,
    /// Error message when the process could not be run at all
    pub error: Option<String>,
}

impl CompileOutcome {
    pub fn exited(return_code: i32, stderr: String) -> Self {
        Self {
            return_code: Some(return_code),
            stderr,
            timed_out: false,
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            return_code: None,
            stderr: String::new(),
            timed_out: false,
            error: Some(error),
        }
    }

    pub fn timeout(program: &str, timeout_secs: u64) -> Self {
        Self {
            return_code: None,
            stderr: String::new(),
            timed_out: true,
            error: Some(format!("{} timed out after {}s", program, timeout_secs)),
        }
    }

    /// Zero exit status
    pub fn is_success(&self) -> bool {
        self.return_code == Some(0)
    }

    /// Human-readable reason for a non-success outcome
    pub fn reason(&self) -> String {
        if let Some(err) = &self.error {
            return err.clone();
        }
        let first_line = self.stderr.lines().next().unwrap_or("").trim();
        match (self.return_code, first_line.is_empty()) {
            (Some(code), true) => format!("exit status {}", code),
            (Some(code), false) => format!("exit status {}: {}", code, first_line),
            (None, _) => "terminated without exit status".to_string(),
        }
    }
}

/// Turns one source file into compiled output next to it
pub trait Compiler: Send + Sync {
    fn compile(&self, source: &Path) -> CompileOutcome;
}

/// Runs an external `javac`-compatible program
#[derive(Debug, Clone)]
pub struct JavacCompiler {
    program: String,
    timeout_secs: u64,
}

impl JavacCompiler {
    pub fn new(program: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            timeout_secs,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for JavacCompiler {
    fn default() -> Self {
        Self::new("javac", DEFAULT_COMPILE_TIMEOUT_SECS)
    }
}

impl Compiler for JavacCompiler {
    fn compile(&self, source: &Path) -> CompileOutcome {
        debug!("Running {} on {}", self.program, source.display());

        let mut command = Command::new(&self.program);
        command.arg(source);
        command.stdout(Stdio::null());
        command.stderr(Stdio::piped());

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return CompileOutcome::failure(format!(
                        "{} not found. Please install a JDK first.",
                        self.program
                    ));
                }
                return CompileOutcome::failure(format!("Failed to run {}: {}", self.program, e));
            }
        };

        run_with_timeout(child, &self.program, self.timeout_secs)
    }
}

/// Poll the child until it exits or the timeout elapses.
///
/// Standard error is drained on a separate thread so a chatty compiler
/// cannot block on a full pipe.
fn run_with_timeout(mut child: Child, program: &str, timeout_secs: u64) -> CompileOutcome {
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });
    let collect_stderr = |reader: Option<thread::JoinHandle<String>>| {
        reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    };

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stderr = collect_stderr(stderr_reader);
                return CompileOutcome::exited(status.code().unwrap_or(-1), stderr);
            }
            Ok(None) => {
                if timeout_secs > 0 && start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!("{} timed out after {}s", program, timeout_secs);
                    return CompileOutcome::timeout(program, timeout_secs);
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return CompileOutcome::failure(format!("Failed to wait for {}: {}", program, e));
            }
        }
    }
}
