/// Application name
pub const APP_NAME: &str = "Gantry";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `log` target used by the default log sink
pub const LOG_TARGET: &str = "gantry";

/// Load-order hint given to declarations that do not set one
pub const DEFAULT_LOAD_ORDER: i32 = 0;
