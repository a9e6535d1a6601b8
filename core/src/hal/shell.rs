//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::loop_settings::CHILD_POLL_INTERVAL_MS;
use crate::config::session::SessionConfig;

use std::os::unix::process::CommandExt;
use std::sync::mpsc;
use std::{io, process, thread, time};

const MERGE_STDERR_PROLOGUE: &str = "exec 2>&1\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub success: bool,
    pub out: Vec<String>,
}

/// An elevated command interpreter installed on the device.
pub trait ShellProvider: Send + Sync {
    fn is_granted(&self, config: &SessionConfig) -> bool;
    fn exec(&self, script: &str, config: &SessionConfig) -> Result<ShellOutput, BoostError>;
}

/// Runs scripts through the `su` binary, feeding them on stdin.
///
/// The child leads its own process group so a timeout can take down
/// everything the script started, not just the interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuShell;

impl SuShell {
    fn spawn(script: &str, config: &SessionConfig) -> Result<process::Child, BoostError> {
        let stderr = if config.merge_stderr {
            process::Stdio::null()
        } else {
            process::Stdio::piped()
        };
        let mut child = process::Command::new(&config.su_binary)
            .stdin(process::Stdio::piped())
            .stdout(process::Stdio::piped())
            .stderr(stderr)
            .process_group(0)
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            let mut body = String::with_capacity(script.len() + MERGE_STDERR_PROLOGUE.len() + 1);
            if config.merge_stderr {
                body.push_str(MERGE_STDERR_PROLOGUE);
            }
            body.push_str(script);
            body.push('\n');
            if let Err(e) = io::Write::write_all(&mut stdin, body.as_bytes()) {
                Self::terminate(&mut child);
                return Err(BoostError::IoError(e));
            }
        }
        Ok(child)
    }

    fn drain<R: io::Read + Send + 'static>(pipe: Option<R>) -> Option<mpsc::Receiver<io::Result<String>>> {
        pipe.map(|mut reader| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let mut buf = String::new();
                let result = io::Read::read_to_string(&mut reader, &mut buf).map(|_| buf);
                let _ = tx.send(result);
            });
            rx
        })
    }

    /// Kills the child's whole process group, then the child itself.
    fn terminate(child: &mut process::Child) {
        let group = i32::try_from(child.id())
            .ok()
            .and_then(rustix::process::Pid::from_raw);
        if let Some(pgid) = group
            && let Err(e) = rustix::process::kill_process_group(pgid, rustix::process::Signal::KILL)
            && e != rustix::io::Errno::SRCH
        {
            log::debug!("SuShell: kill of process group {} failed: {e}", child.id());
        }
        let _ = child.kill();
        let _ = child.wait();
    }

    fn remaining(deadline: time::Instant) -> time::Duration {
        deadline.saturating_duration_since(time::Instant::now())
    }
}

impl ShellProvider for SuShell {
    /// Uid 0 is granted without a probe. Otherwise runs `id -u` through `su`
    /// with the session timeout, so a pending grant dialog is waited for.
    fn is_granted(&self, config: &SessionConfig) -> bool {
        if rustix::process::geteuid().is_root() {
            return true;
        }
        let probe = SessionConfig {
            merge_stderr: false,
            ..config.clone()
        };
        match self.exec("id -u", &probe) {
            Ok(output) => {
                output.success && output.out.first().is_some_and(|uid| uid.trim() == "0")
            }
            Err(e) => {
                log::debug!("SuShell: Elevation probe failed ({}): {e}", e.cause());
                false
            }
        }
    }

    /// The whole call, including collecting output, is bounded by `config.timeout`.
    fn exec(&self, script: &str, config: &SessionConfig) -> Result<ShellOutput, BoostError> {
        let deadline = time::Instant::now() + config.timeout;
        let mut child = Self::spawn(script, config)?;
        let stdout_rx = Self::drain(child.stdout.take());
        let stderr_rx = Self::drain(child.stderr.take());
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if time::Instant::now() >= deadline {
                        Self::terminate(&mut child);
                        return Err(BoostError::Timeout(config.timeout));
                    }
                    thread::sleep(time::Duration::from_millis(CHILD_POLL_INTERVAL_MS));
                }
                Err(e) => {
                    Self::terminate(&mut child);
                    return Err(BoostError::IoError(e));
                }
            }
        };
        // Background jobs of the script may still hold the pipes open.
        let stdout = match stdout_rx.map(|rx| rx.recv_timeout(Self::remaining(deadline))) {
            Some(Ok(result)) => result?,
            Some(Err(mpsc::RecvTimeoutError::Timeout)) => {
                log::warn!("SuShell: Output still open at deadline, killing leftover jobs.");
                Self::terminate(&mut child);
                return Err(BoostError::Timeout(config.timeout));
            }
            Some(Err(mpsc::RecvTimeoutError::Disconnected)) => {
                return Err(BoostError::SystemCheckFailed("stdout reader panicked".into()));
            }
            None => String::new(),
        };
        match stderr_rx.map(|rx| rx.recv_timeout(Self::remaining(deadline))) {
            Some(Ok(Ok(stderr))) if !stderr.trim().is_empty() => {
                log::debug!("SuShell: stderr: {}", stderr.trim_end());
            }
            Some(Err(mpsc::RecvTimeoutError::Timeout)) => Self::terminate(&mut child),
            _ => {}
        }
        Ok(ShellOutput {
            success: status.success(),
            out: stdout.lines().map(str::to_string).collect(),
        })
    }
}
