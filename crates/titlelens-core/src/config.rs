use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoreError, Result};

pub const DEFAULT_TOP_K: usize = 1000;
pub const DEFAULT_MIN_COUNT: u64 = 3;

/// Settings for one analysis run, usually parsed from a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub input_path: Option<PathBuf>,
    pub top_k: usize,
    pub min_count: u64,
    /// AFINN-format lexicon replacing the bundled one.
    pub lexicon_path: Option<PathBuf>,
    pub extra_stopwords: Vec<String>,
    pub cloud: CloudOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            top_k: DEFAULT_TOP_K,
            min_count: DEFAULT_MIN_COUNT,
            lexicon_path: None,
            extra_stopwords: Vec::new(),
            cloud: CloudOptions::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(CoreError::Validation("top_k must be positive".into()));
        }
        if self.min_count == 0 {
            return Err(CoreError::Validation("min_count must be positive".into()));
        }
        self.cloud.validate()
    }
}

/// Word-cloud canvas and sizing options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: u32,
    /// Defaults to a fifth of the canvas height.
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    pub relative_scaling: f64,
    pub background: String,
    pub include_numbers: bool,
    pub normalize_plurals: bool,
    /// Keep the rendered SVG here; when unset the cloud is only shown.
    pub output_path: Option<PathBuf>,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            relative_scaling: 0.5,
            background: "white".to_string(),
            include_numbers: false,
            normalize_plurals: true,
            output_path: None,
        }
    }
}

impl CloudOptions {
    pub fn effective_max_font_size(&self) -> u32 {
        self.max_font_size
            .unwrap_or(self.height / 5)
            .max(self.min_font_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::Validation(
                "cloud canvas must have non-zero width and height".into(),
            ));
        }
        if self.font_step == 0 {
            return Err(CoreError::Validation("cloud font_step must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(CoreError::Validation(format!(
                "cloud relative_scaling must be within [0, 1], got {}",
                self.relative_scaling
            )));
        }
        Ok(())
    }
}
