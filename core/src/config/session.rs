//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::loop_settings::COMMAND_TIMEOUT_SEC;

use std::sync::atomic;
use std::{sync, time};

static GLOBAL_SESSION: sync::OnceLock<sync::Arc<RootSession>> = sync::OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub merge_stderr: bool,
    pub timeout: time::Duration,
    pub su_binary: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            merge_stderr: true,
            timeout: time::Duration::from_secs(COMMAND_TIMEOUT_SEC),
            su_binary: "su".to_string(),
        }
    }
}

/// Elevated-shell parameters shared by every component that runs root commands.
///
/// Written once and only read afterwards; hand out clones of the `Arc`.
/// A root grant, once observed, is remembered for the life of the session.
/// Denials are not, so a later grant is still picked up.
#[derive(Debug)]
pub struct RootSession {
    config: SessionConfig,
    root_granted: atomic::AtomicBool,
}

impl RootSession {
    pub fn new(config: SessionConfig) -> sync::Arc<Self> {
        sync::Arc::new(Self {
            config,
            root_granted: atomic::AtomicBool::new(false),
        })
    }

    /// Installs the process-wide session. Later calls keep the first
    /// configuration and return the same handle.
    pub fn initialize(config: SessionConfig) -> sync::Arc<Self> {
        let mut fresh = false;
        let session = GLOBAL_SESSION.get_or_init(|| {
            fresh = true;
            log::info!(
                "RootSession: Initialized (merge_stderr={}, timeout={}s, su={}).",
                config.merge_stderr,
                config.timeout.as_secs(),
                config.su_binary
            );
            Self::new(config.clone())
        });
        if !fresh {
            log::debug!("RootSession: Already initialized, ignoring new configuration.");
        }
        sync::Arc::clone(session)
    }

    pub fn global() -> Option<sync::Arc<Self>> {
        GLOBAL_SESSION.get().cloned()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_root_granted(&self) -> bool {
        self.root_granted.load(atomic::Ordering::Acquire)
    }

    pub fn mark_root_granted(&self) {
        if !self.root_granted.swap(true, atomic::Ordering::AcqRel) {
            log::info!("RootSession: Root access granted.");
        }
    }
}
