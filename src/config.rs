// config.rs
//! Config code

use std::{
    fs,
    sync::LazyLock,
};

use serde::Deserialize;

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (from trace to off, case insensitive)
    pub log_level:       String,
    /// Whether to log to the console
    pub log_to_console:  bool,
    /// Max log size in bytes
    pub log_max_size:    u64,
    /// Address the server listens on
    pub server_address:  String,
    /// Max size of an uploaded file, in bytes
    pub max_upload_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:       "debug".to_string(),
            log_to_console:  true,
            log_max_size:    64 * 1024 * 1024, // 64 MiB
            server_address:  "127.0.0.1:7030".to_string(),
            max_upload_size: 8 * 1024 * 1024, // 8 MiB
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = "/etc/updrop/config.toml";

        // Logging isn't up yet when the config is first touched, hence eprintln
        let config_str = match fs::read_to_string(config_path) {
            | Ok(c) => c,
            | Err(e) => {
                eprintln!("Failed to read config file at {config_path}: {e}");
                eprintln!("The default config will be used");
                return Self::default()
            },
        };

        match toml::de::from_str(&config_str) {
            | Ok(c) => c,
            | Err(e) => {
                eprintln!("\x1b[31;1mInvalid config: {e}\x1b[0m");
                eprintln!("\x1b[31;1mThe default config will be used\x1b[0m");
                Self::default()
            },
        }
    }
}
