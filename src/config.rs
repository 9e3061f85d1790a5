use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Telesana";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the HTTP server listens on when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Demo population defaults
pub const DEFAULT_PATIENT_COUNT: usize = 10;
pub const DEMO_PASSWORD: &str = "Demo@1234";
pub const DEMO_HASH_COST: u32 = 10;
pub const DEMO_EMAIL_DOMAIN: &str = "demo.telesana.com";

pub const DATABASE_FILE_NAME: &str = "telesana.db";

/// Get the application data directory
/// Platform data dir (e.g. ~/.local/share/Telesana), or ./Telesana when
/// no home is known.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Database used by `telesana seed` when no path is given
pub fn default_database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE_NAME)
}

/// Log filter applied when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "telesana=debug,telesana_lib=debug,info"
    } else {
        "telesana=info,telesana_lib=info,warn"
    }
}
