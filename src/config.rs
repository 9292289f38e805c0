use crate::error::{AssetListError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub background: BackgroundConfig,
    pub sounds: SoundConfig,
    pub sound_list: SoundListConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Regex marking the start of the background table declaration
    pub start_pattern: String,
    /// Regex marking the end of the table
    pub close_pattern: String,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundConfig {
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundListConfig {
    pub header: MarkerConfig,
    pub member: MarkerConfig,
}

/// A literal token expected at a fixed byte column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkerConfig {
    pub offset: usize,
    pub token: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            start_pattern: r"const\s+char\s*\*\s*bg_list".to_string(),
            close_pattern: r"\};".to_string(),
            extension: "rgab".to_string(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            extension: "mp3".to_string(),
        }
    }
}

impl Default for SoundListConfig {
    fn default() -> Self {
        Self {
            header: MarkerConfig {
                offset: 1,
                token: "-- ".to_string(),
            },
            member: MarkerConfig {
                offset: 5,
                token: "-- ".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AssetListError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AssetListError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AssetListError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["assetlist.toml", ".assetlist.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref start) = cli_args.start_pattern {
            self.background.start_pattern = start.clone();
        }

        if let Some(ref close) = cli_args.close_pattern {
            self.background.close_pattern = close.clone();
        }

        if let Some(ref extension) = cli_args.background_extension {
            self.background.extension = normalize_extension(extension);
        }

        if let Some(ref extension) = cli_args.sound_extension {
            self.sounds.extension = normalize_extension(extension);
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| AssetListError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)
            .map_err(|e| AssetListError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        compile_pattern(&self.background.start_pattern)?;
        compile_pattern(&self.background.close_pattern)?;

        if self.background.extension.is_empty() {
            return Err(AssetListError::Config {
                message: "Background file extension must not be empty".to_string(),
            });
        }

        if self.sounds.extension.is_empty() {
            return Err(AssetListError::Config {
                message: "Sound file extension must not be empty".to_string(),
            });
        }

        for (name, marker) in [
            ("header", &self.sound_list.header),
            ("member", &self.sound_list.member),
        ] {
            if marker.token.trim().is_empty() {
                return Err(AssetListError::Config {
                    message: format!("Sound list {} marker token must not be blank", name),
                });
            }
        }

        if self.sound_list.header == self.sound_list.member {
            return Err(AssetListError::Config {
                message: "Sound list header and member markers must differ".to_string(),
            });
        }

        Ok(())
    }

}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| AssetListError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub start_pattern: Option<String>,
    pub close_pattern: Option<String>,
    pub background_extension: Option<String>,
    pub sound_extension: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_pattern(mut self, pattern: Option<String>) -> Self {
        self.start_pattern = pattern;
        self
    }

    pub fn with_close_pattern(mut self, pattern: Option<String>) -> Self {
        self.close_pattern = pattern;
        self
    }

    pub fn with_background_extension(mut self, extension: Option<String>) -> Self {
        self.background_extension = extension;
        self
    }

    pub fn with_sound_extension(mut self, extension: Option<String>) -> Self {
        self.sound_extension = extension;
        self
    }
}
