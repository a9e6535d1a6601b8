//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::session::RootSession;
use crate::hal::shell::{ShellProvider, SuShell};

use std::sync;

/// Single entry point for every privileged command. Elevation is checked
/// before a script is handed to the provider.
#[derive(Clone)]
pub struct PrivilegedExecutor {
    session: sync::Arc<RootSession>,
    provider: sync::Arc<dyn ShellProvider>,
}

impl PrivilegedExecutor {
    pub fn new(session: sync::Arc<RootSession>, provider: sync::Arc<dyn ShellProvider>) -> Self {
        Self { session, provider }
    }

    pub fn with_su(session: sync::Arc<RootSession>) -> Self {
        Self::new(session, sync::Arc::new(SuShell))
    }

    pub fn session(&self) -> &RootSession {
        &self.session
    }

    /// Probes the provider until a grant is seen, then answers from the session.
    pub fn is_elevated(&self) -> bool {
        if self.session.is_root_granted() {
            return true;
        }
        let granted = self.provider.is_granted(self.session.config());
        if granted {
            self.session.mark_root_granted();
        }
        granted
    }

    pub fn execute<S: AsRef<str>>(&self, commands: &[S]) -> Result<String, BoostError> {
        if commands.is_empty() {
            return Err(BoostError::InvalidInput("Empty command batch".into()));
        }
        if !self.is_elevated() {
            return Err(BoostError::NotElevated);
        }
        let script = commands
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        let output = self.provider.exec(&script, self.session.config())?;
        if !output.success {
            return Err(BoostError::CommandFailed(format!(
                "{} command(s) failed: {}",
                commands.len(),
                output.out.join(" | ")
            )));
        }
        Ok(output.out.join("\n"))
    }

    pub fn run(&self, command: &str) -> Option<String> {
        Self::collapse(self.execute(&[command]), command)
    }

    pub fn run_batch<S: AsRef<str>>(&self, commands: &[S]) -> Option<String> {
        let label = commands.first().map_or("<empty batch>", |c| c.as_ref());
        Self::collapse(self.execute(commands), label)
    }

    fn collapse(result: Result<String, BoostError>, label: &str) -> Option<String> {
        match result {
            Ok(out) => Some(out),
            Err(e) => {
                log::warn!("Executor: '{label}' yielded no result ({}): {e}", e.cause());
                None
            }
        }
    }
}
