//! Author: [Seclususs](https://github.com/seclususs)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyProfile {
    pub min_khz: u32,
    pub max_khz: u32,
}

impl FrequencyProfile {
    pub const fn new(min_khz: u32, max_khz: u32) -> Self {
        Self { min_khz, max_khz }
    }
}

pub const GAME_PROFILE: FrequencyProfile = FrequencyProfile::new(1_800_000, 2_500_000);
pub const BOOST_PROFILE: FrequencyProfile = FrequencyProfile::new(1_800_000, 2_300_000);
pub const NORMAL_PROFILE: FrequencyProfile = FrequencyProfile::new(300_000, 1_800_000);

pub const ANIMATIONS_OFF: f32 = 0.0;
pub const ANIMATIONS_ON: f32 = 1.0;

pub const PROTECTED_PACKAGE_PREFIXES: [&str; 2] = ["com.android", "com.google"];
pub const SELF_PACKAGE_MARKER: &str = "titanbooster";

pub fn is_protected_package(name: &str) -> bool {
    PROTECTED_PACKAGE_PREFIXES
        .iter()
        .any(|&prefix| name.starts_with(prefix))
        || name.contains(SELF_PACKAGE_MARKER)
}
