//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init() {
    let env = Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn init_tolerates_repeated_calls() {
        init();
        init();
        log::info!("logger installed");
    }
}
