pub fn init_logging() {
    env_logger::builder()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}

#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        log::error!($($arg)+);
        std::process::exit(1)
    });
}
