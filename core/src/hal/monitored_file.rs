//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;

use std::{fs, io, path};

/// Keeps a procfs/sysfs node open and re-reads its head on demand.
pub struct MonitoredFile<const BUFFER_SIZE: usize> {
    file: fs::File,
    buffer: [u8; BUFFER_SIZE],
}

impl<const BUFFER_SIZE: usize> MonitoredFile<BUFFER_SIZE> {
    pub fn new(path: &path::Path) -> Result<Self, BoostError> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BoostError::SensorMissing(path.display().to_string())
            } else {
                BoostError::IoError(e)
            }
        })?;
        Ok(Self {
            file,
            buffer: [0u8; BUFFER_SIZE],
        })
    }

    pub fn read_value(&mut self) -> Result<&str, BoostError> {
        io::Seek::seek(&mut self.file, io::SeekFrom::Start(0))?;
        let mut filled = 0;
        while filled < BUFFER_SIZE {
            let n = io::Read::read(&mut self.file, &mut self.buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        let bytes = &self.buffer[..filled];
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) if e.error_len().is_none() => {
                // Truncated in the middle of a multi-byte sequence.
                Ok(std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default())
            }
            Err(e) => Err(BoostError::ParseError(format!("Invalid UTF-8: {e}"))),
        }
    }
}
