//! Configuration file loading (lfm.toml).

use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use lfm_flavor::FlavorOptions;
use serde::Deserialize;

/// Configuration file structure (lfm.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub flavor: FlavorOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

/// What the CLI prints for a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Serialized markdown
    Markdown,
    /// The document tree as pretty-printed JSON
    Json,
}

/// Apply CLI flavor flags over the config file's options.
///
/// `--single-tilde` asks for single-tilde strikethrough and
/// `--no-user-link-luogu` turns the user-link option off; either flag wins
/// over lfm.toml when given.
pub fn merge_flavor(
    base: FlavorOptions,
    single_tilde: bool,
    no_user_link_luogu: bool,
) -> FlavorOptions {
    let mut options = base;
    if single_tilde {
        options.single_tilde = true;
    }
    if no_user_link_luogu {
        options.user_link_point_to_luogu = false;
    }
    options
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[flavor]
single_tilde = false
user_link_point_to_luogu = false

[output]
format = "json"
"#,
        )
        .unwrap();

        assert!(!config.flavor.single_tilde);
        assert!(!config.flavor.user_link_point_to_luogu);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: ConfigFile = toml::from_str("").unwrap();

        assert_eq!(config.flavor, FlavorOptions::default());
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(config.flavor, FlavorOptions::default());
    }

    #[test]
    fn cli_flags_win_over_config() {
        let base = FlavorOptions {
            single_tilde: false,
            user_link_point_to_luogu: true,
        };

        let merged = merge_flavor(base, true, true);

        assert!(merged.single_tilde);
        assert!(!merged.user_link_point_to_luogu);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let base = FlavorOptions {
            single_tilde: false,
            user_link_point_to_luogu: false,
        };

        let merged = merge_flavor(base, false, false);

        assert_eq!(merged, base);
    }
}
