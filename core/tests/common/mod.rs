//! Author: [Seclususs](https://github.com/seclususs)

#![allow(dead_code)]

use titan_booster::common::error::BoostError;
use titan_booster::config::session::{RootSession, SessionConfig};
use titan_booster::controllers::tuner::SystemTuner;
use titan_booster::hal::executor::PrivilegedExecutor;
use titan_booster::hal::shell::{ShellOutput, ShellProvider};

use std::sync::{self, atomic};

type Responder = Box<dyn Fn(&str) -> ShellOutput + Send + Sync>;

/// Records every script it is handed and answers through `responder`.
pub struct RecordingShell {
    granted: atomic::AtomicBool,
    probes: atomic::AtomicUsize,
    scripts: sync::Mutex<Vec<String>>,
    responder: Responder,
}

impl RecordingShell {
    pub fn granted() -> sync::Arc<Self> {
        Self::with_responder(true, |_| ok(&[]))
    }

    pub fn denied() -> sync::Arc<Self> {
        Self::with_responder(false, |_| ok(&[]))
    }

    pub fn with_responder(
        granted: bool,
        responder: impl Fn(&str) -> ShellOutput + Send + Sync + 'static,
    ) -> sync::Arc<Self> {
        sync::Arc::new(Self {
            granted: atomic::AtomicBool::new(granted),
            probes: atomic::AtomicUsize::new(0),
            scripts: sync::Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, atomic::Ordering::SeqCst);
    }

    pub fn probes(&self) -> usize {
        self.probes.load(atomic::Ordering::SeqCst)
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    /// Every dispatched script split back into its commands.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.scripts()
            .iter()
            .map(|s| s.lines().map(str::to_string).collect())
            .collect()
    }
}

impl ShellProvider for RecordingShell {
    fn is_granted(&self, _config: &SessionConfig) -> bool {
        self.probes.fetch_add(1, atomic::Ordering::SeqCst);
        self.granted.load(atomic::Ordering::SeqCst)
    }

    fn exec(&self, script: &str, _config: &SessionConfig) -> Result<ShellOutput, BoostError> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok((self.responder)(script))
    }
}

pub fn ok(lines: &[&str]) -> ShellOutput {
    ShellOutput {
        success: true,
        out: lines.iter().map(|l| (*l).to_string()).collect(),
    }
}

pub fn failed(lines: &[&str]) -> ShellOutput {
    ShellOutput {
        success: false,
        out: lines.iter().map(|l| (*l).to_string()).collect(),
    }
}

pub fn executor(shell: &sync::Arc<RecordingShell>) -> PrivilegedExecutor {
    PrivilegedExecutor::new(
        RootSession::new(SessionConfig::default()),
        sync::Arc::clone(shell) as sync::Arc<dyn ShellProvider>,
    )
}

pub fn tuner(shell: &sync::Arc<RecordingShell>) -> SystemTuner {
    SystemTuner::new(executor(shell))
}
