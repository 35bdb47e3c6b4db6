//! Configuration file loader with multi-source merging

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};

use super::file_config::FileConfig;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./nlmake.toml` or `./.nlmake.toml`
    /// 3. Global: `~/.config/nlmake/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nlmake").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["nlmake.toml", ".nlmake.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Describe the config sources in priority order (for `config path`).
    pub fn describe_sources() -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./nlmake.toml or ./.nlmake.toml".to_string()),
        }
        match Self::global_config_path() {
            Some(path) if path.exists() => {
                lines.push(format!("  [FOUND] Global:  {}", path.display()));
            }
            Some(path) => lines.push(format!("  [     ] Global:  {}", path.display())),
            None => lines.push("  [     ] Global:  (no config directory)".to_string()),
        }
        lines.push("  [ALWAYS] Built-in defaults".to_string());
        lines.join("\n")
    }
}
