//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::monitors::memory_monitor::BYTES_PER_GB;

use std::path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageSnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl StorageSnapshot {
    pub fn used_gb(&self) -> f32 {
        (self.total_bytes.saturating_sub(self.free_bytes) as f64 / BYTES_PER_GB) as f32
    }

    pub fn total_gb(&self) -> f32 {
        (self.total_bytes as f64 / BYTES_PER_GB) as f32
    }
}

pub fn read_storage(mount: &path::Path) -> Result<StorageSnapshot, BoostError> {
    let stats = rustix::fs::statvfs(mount)?;
    Ok(StorageSnapshot {
        total_bytes: stats.f_blocks.saturating_mul(stats.f_frsize),
        free_bytes: stats.f_bavail.saturating_mul(stats.f_frsize),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_filesystem_has_capacity() {
        let snap = read_storage(path::Path::new("/")).unwrap();
        assert!(snap.total_bytes >= snap.free_bytes);
        assert!(snap.used_gb() <= snap.total_gb());
    }

    #[test]
    fn missing_mount_is_an_error() {
        assert!(read_storage(path::Path::new("/nonexistent/mount")).is_err());
    }
}
