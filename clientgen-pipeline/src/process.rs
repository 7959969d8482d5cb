//! Subprocess execution with fully captured output streams.

use std::{
    io::Read,
    path::Path,
    process::{Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::Duration,
};

use clientgen_core::{Error, Result, Stage};
use wait_timeout::ChildExt;

/// Output of a finished subprocess.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit status as shown to the operator.
    pub fn status_text(&self) -> String {
        match self.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "no exit code (terminated by signal)".to_string(),
        }
    }
}

/// Run `program` with `args` in `cwd`, draining stdout and stderr to completion
/// before the exit status is read.
///
/// With a `timeout`, the child is killed once the deadline passes and the run
/// fails with [`Error::TimedOut`] without waiting for the streams to close.
pub fn run_captured(
    stage: Stage,
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    timeout: Option<Duration>,
) -> Result<Captured> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|source| {
        Box::new(Error::Spawn {
            stage,
            program: program.to_string(),
            source,
        })
    })?;
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let wait_error = |source| {
        Box::new(Error::Wait {
            stage,
            program: program.to_string(),
            source,
        })
    };

    let status = match timeout {
        Some(limit) => child.wait_timeout(limit).map_err(wait_error)?,
        None => Some(child.wait().map_err(wait_error)?),
    };

    let Some(status) = status else {
        child.kill().map_err(wait_error)?;
        child.wait().map_err(wait_error)?;
        // Descendants of the child may still hold the pipes open, so the drain
        // threads are detached rather than joined.
        return Err(Box::new(Error::TimedOut {
            stage,
            program: program.to_string(),
            timeout: timeout.unwrap_or_default(),
        }));
    };

    Ok(Captured {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    })
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<String>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            // A read error here only truncates diagnostics; the exit status still decides.
            let _ = stream.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
