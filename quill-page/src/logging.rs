use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// Logging configuration for the Quill page controller
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Master switch to enable/disable all logging
    pub enabled: bool,
    /// Path to the log file
    pub log_file: PathBuf,
    /// Whether to clear the log file on startup
    pub clear_on_startup: bool,
    /// Feature flags for specific logging categories
    pub features: LogFeatures,
    /// Overall log level
    pub level: LevelFilter,
}

/// Feature flags for specific logging categories
#[derive(Debug, Clone)]
pub struct LogFeatures {
    /// Log modal rebinding and reply-target resolution
    pub modal_state: bool,
    /// Log vote requests and their outcomes
    pub api_calls: bool,
    /// Log the page-load binding pass
    pub bindings: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("quill_page.log"),
            clear_on_startup: true,
            features: LogFeatures::default(),
            level: LevelFilter::Debug,
        }
    }
}

impl Default for LogFeatures {
    fn default() -> Self {
        Self {
            modal_state: true,
            api_calls: true,
            bindings: true,
        }
    }
}

impl LogConfig {
    /// Create a new log configuration with all features disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create a minimal log configuration (only errors and warnings)
    pub fn minimal() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Warn,
            features: LogFeatures {
                modal_state: false,
                api_calls: false,
                bindings: false,
            },
            ..Default::default()
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        let _ = WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink());
        return Ok(());
    }

    if config.clear_on_startup {
        let _ = File::create(&config.log_file)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    WriteLogger::init(config.level, log_config, log_file)?;

    log::info!(
        "Logging initialized: file={}, level={:?}",
        config.log_file.display(),
        config.level
    );

    Ok(())
}

/// Macro for logging modal rebinding
#[macro_export]
macro_rules! log_modal_state {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.modal_state {
            log::debug!(target: "modal_state", $($arg)*);
        }
    };
}

/// Macro for logging vote requests
#[macro_export]
macro_rules! log_api_call {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.api_calls {
            log::debug!(target: "api_calls", $($arg)*);
        }
    };
}

/// Macro for logging the binding pass
#[macro_export]
macro_rules! log_binding {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.bindings {
            log::debug!(target: "bindings", $($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_keeps_the_master_switch_off() {
        let config = LogConfig::disabled();
        assert!(!config.enabled);
    }

    #[test]
    fn minimal_config_turns_every_category_off() {
        let config = LogConfig::minimal();
        assert!(config.enabled);
        assert_eq!(config.level, LevelFilter::Warn);
        assert!(!config.features.modal_state);
        assert!(!config.features.api_calls);
        assert!(!config.features.bindings);
    }

    #[test]
    fn init_writes_to_the_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            log_file: dir.path().join("page.log"),
            ..Default::default()
        };
        // A logger may already be installed by another test; only the file
        // creation is asserted here.
        let _ = init_logging(&config);
        assert!(config.log_file.exists());
    }
}
