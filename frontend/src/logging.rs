use env_logger::Env;

pub const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .try_init();
}
