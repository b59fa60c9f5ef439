// utils/log.rs
//! Logging setup

use std::{
    fs,
    io,
    str::FromStr,
    sync::OnceLock,
};

use tracing::{
    debug,
    error,
    level_filters::LevelFilter,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling,
};
use tracing_subscriber::{
    EnvFilter,
    fmt::time,
    prelude::*,
};

use crate::config::CONFIG;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
const LOG_FILE: &str = "/var/log/updrop.log";

/// # Rotates an oversized log file aside
///
/// If the log file exceeds `max_size` bytes, it is renamed to `<file>.old`,
/// replacing any previous rotation, and a fresh file is started.
///
/// # Returns
/// Whether a rotation happened
///
/// # Errors
/// - I/O errors from stat or rename (`NotFound` is expected on first run)
pub fn rotate_log(path: &str, max_size: u64) -> io::Result<bool> {
    let size = fs::metadata(path)?.len();

    if size <= max_size {
        return Ok(false);
    }

    fs::rename(path, format!("{path}.old"))?;
    Ok(true)
}

pub fn log() {
    let file_appender = {
        let (dir, file) = LOG_FILE.rsplit_once('/').unwrap();
        rolling::never(dir, file)
    };

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let level = LevelFilter::from_str(&CONFIG.log_level).unwrap_or(LevelFilter::DEBUG);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("LOG_LEVEL")
        .from_env_lossy()
        // Silence some loud crates
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("hyper_util=warn".parse().unwrap())
        .add_directive("h2=warn".parse().unwrap());

    if CONFIG.log_to_console {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_level(true)
            .with_target(true)
            .with_line_number(true)
            .with_timer(time::uptime())
            .with_writer(file_writer.and(io::stdout))
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_level(true)
            .with_target(true)
            .with_line_number(true)
            .with_timer(time::uptime())
            .with_writer(file_writer)
            .compact()
            .init();
    }

    if LOG_GUARD.set(guard).is_err() {
        eprintln!("The log() function was called more than once.");
        eprintln!("Please report this as a bug.");
    }
}

/// # Initialize logging
///
/// This function wraps all the logging setup, including rotation
pub fn init() {
    // Rotation has to happen before the appender opens the file
    match rotate_log(LOG_FILE, CONFIG.log_max_size) {
        | Ok(rotated) => {
            log();
            if rotated {
                debug!("Rotated oversized log file to {LOG_FILE}.old");
            }
        },
        | Err(e) if e.kind() == io::ErrorKind::NotFound => log(),
        | Err(e) => {
            log();
            error!("Failed to rotate log file: {e}");
        },
    }
}
