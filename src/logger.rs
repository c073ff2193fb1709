use chrono::Utc;

/// Wall-clock prefix shared by all log macros. Logs go to stderr so stdout
/// stays free for telemetry output.
pub fn timestamp() -> String {
    Utc::now().format("%H:%M:%S%.3f").to_string()
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        eprintln!("\x1b[32m[INFO] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!("\x1b[35m[WARN] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

/// Per-tick trace output, only when `LOG_FLIGHT_EVENTS` is set.
#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var("LOG_FLIGHT_EVENTS").is_ok() {
            eprintln!("\x1b[36m[EVENT][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}
