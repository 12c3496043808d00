use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aws: AwsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Tag key whose value becomes the display name
    pub name_tag: String,
    /// Operating system used for price lookups
    pub os: String,
    /// Listing page size (provider caps at 1000)
    pub page_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: AwsConfig {
                name_tag: "Name".to_string(),
                os: "Linux".to_string(),
                page_size: 1000,
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .invctl.toml in current dir, then ~/.config/invctl/config.toml
            let local = PathBuf::from(".invctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("invctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".invctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
            config.aws.page_size = config.aws.page_size.clamp(1, 1000);
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'invctl init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.aws.name_tag, "Name");
        assert_eq!(config.aws.os, "Linux");
        assert_eq!(config.aws.page_size, 1000);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let config = Config::default();
        assert!(config.save(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.aws.name_tag, config.aws.name_tag);
        assert_eq!(loaded.aws.page_size, config.aws.page_size);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let fake_path = temp_dir.path().join("nonexistent.toml");

        // Should return default config
        let config = Config::load(Some(&fake_path)).unwrap();
        assert_eq!(config.aws.os, "Linux");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content {").unwrap();

        let result = Config::load(Some(&config_path));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_page_size_clamped() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("big_page.toml");
        std::fs::write(
            &config_path,
            "[aws]\nname_tag = \"Name\"\nos = \"Linux\"\npage_size = 5000\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.aws.page_size, 1000);
    }

    #[test]
    fn test_init_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("init_test.toml");

        assert!(init_config(&config_path).is_ok());
        assert!(config_path.exists());

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.aws.name_tag, "Name");
    }
}
