//! Author: [Seclususs](https://github.com/seclususs)

#[cfg(target_os = "android")]
pub fn init() {
    use android_logger::Config;
    use log::LevelFilter;

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };
    android_logger::init_once(Config::default().with_tag("Booster").with_max_level(level));
}

#[cfg(not(target_os = "android"))]
pub fn init() {}
