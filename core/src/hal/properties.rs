//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;

use std::process::Command;

fn validate_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-')
}

pub fn get_system_property(key: &str) -> Result<String, BoostError> {
    if !validate_key(key) {
        return Err(BoostError::InvalidInput(format!(
            "Invalid characters in key: '{key}'"
        )));
    }
    let output = Command::new("getprop").arg(key).output()?;
    if !output.status.success() {
        return Err(BoostError::CommandFailed(format!("getprop {key}")));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_validated_before_spawning() {
        assert!(matches!(
            get_system_property("ro.product.model; id"),
            Err(BoostError::InvalidInput(_))
        ));
        assert!(matches!(get_system_property(""), Err(BoostError::InvalidInput(_))));
        assert!(validate_key("ro.build.version.release"));
    }
}
