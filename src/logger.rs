/// Installs an `env_logger` backend for the host binary.
///
/// Returns `false` when a logger was already installed.
pub fn init_logger(verbose: bool) -> bool {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .try_init()
        .is_ok()
}
