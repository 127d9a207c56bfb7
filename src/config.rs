use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data roots
const APP_DIR: &str = "memlane";

/// Settings file name
pub const SETTINGS_FILE: &str = "memlane.json";

/// Default log file name (for `--log` without a path)
pub const LOG_FILE: &str = "memlane.log";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (MEMLANE_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("MEMLANE_CONFIG_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. MEMLANE_CONFIG_DIR environment variable
/// 3. Local folder IF any memlane files exist (memlane.json, memlane.log)
/// 4. Platform-specific config directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.config/memlane/{name}
/// - macOS: ~/Library/Application Support/memlane/{name}
/// - Windows: %APPDATA%\memlane\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

/// Get path to a data file (logs, snapshots)
///
/// Same priority as [`config_file`], falling back to the platform data
/// directory (~/.local/share/memlane on Linux).
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = get_config_dir(config);
    let data_dir = get_data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }

    // Only create data_dir if it's different from config_dir
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

/// Check if any memlane files exist in the given directory
fn has_local_config_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

/// Pick a directory: explicit override, then a local folder holding
/// memlane files, then the platform root, then ".".
fn resolve_dir(config: &PathConfig, local: Option<PathBuf>, platform_root: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Some(dir) = local.filter(|d| has_local_config_files(d)) {
        return dir;
    }
    platform_root
        .map(|root| root.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, std::env::current_dir().ok(), dirs_next::config_dir())
}

fn get_data_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, std::env::current_dir().ok(), dirs_next::data_dir())
}
