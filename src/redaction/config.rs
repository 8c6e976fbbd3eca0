//! Detection, geometry and audit configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Detection mode
///
/// Aggressive mode enables the low-confidence rule set and lowers the
/// acceptance threshold, trading precision for recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Threshold 0.7, aggressive-only rules disabled
    #[default]
    Normal,
    /// Threshold 0.5, all rules enabled
    Aggressive,
}

impl DetectionMode {
    /// Minimum confidence for a candidate to be accepted
    pub fn threshold(&self) -> f32 {
        match self {
            Self::Normal => 0.7,
            Self::Aggressive => 0.5,
        }
    }

    /// Whether aggressive-only rules and dictionaries are active
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Aggressive)
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for DetectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "aggressive" => Ok(Self::Aggressive),
            _ => anyhow::bail!("Invalid detection mode: {s}. Use 'normal' or 'aggressive'"),
        }
    }
}

/// Detection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Detection mode
    #[serde(default)]
    pub mode: DetectionMode,

    /// Custom rule library replacing the built-in catalog
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,
}

impl DetectionConfig {
    /// Validate detection settings
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.pattern_library {
            if !path.exists() {
                anyhow::bail!(
                    "detection.pattern_library file not found: {}",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PHI_REDACTOR_DETECTION_MODE") {
            self.mode = val
                .parse()
                .context("Invalid PHI_REDACTOR_DETECTION_MODE value")?;
        }

        if let Ok(val) = std::env::var("PHI_REDACTOR_DETECTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        Ok(())
    }
}

/// Settings for drawing redaction boxes on page images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Pixels added on every side of a word box
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// RGB fill color of redaction boxes
    #[serde(default = "default_fill_color")]
    pub fill_color: [u8; 3],
}

fn default_padding() -> u32 {
    2
}

fn default_fill_color() -> [u8; 3] {
    [0, 0, 0]
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            fill_color: default_fill_color(),
        }
    }
}

impl GeometryConfig {
    /// Validate geometry settings
    pub fn validate(&self) -> Result<()> {
        if self.padding > 50 {
            anyhow::bail!("geometry.padding must be <= 50 pixels, got {}", self.padding);
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PHI_REDACTOR_GEOMETRY_PADDING") {
            self.padding = val
                .parse()
                .context("Invalid PHI_REDACTOR_GEOMETRY_PADDING value")?;
        }
        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_enabled() -> bool {
    false
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("audit.log_path must be set when audit logging is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PHI_REDACTOR_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid PHI_REDACTOR_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("PHI_REDACTOR_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PHI_REDACTOR_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid PHI_REDACTOR_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}

/// Everything the redaction engine needs from configuration
#[derive(Debug, Clone)]
pub struct RedactionSettings {
    pub detection: DetectionConfig,
    pub geometry: GeometryConfig,
    pub audit: AuditConfig,
    /// Pages whose shorter side is below this are upscaled before recognition
    pub upscale_min_dimension: u32,
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            geometry: GeometryConfig::default(),
            audit: AuditConfig::default(),
            upscale_min_dimension: crate::redaction::preprocess::DEFAULT_UPSCALE_MIN_DIMENSION,
        }
    }
}

impl RedactionSettings {
    /// Default settings with the given detection mode
    pub fn with_mode(mode: DetectionMode) -> Self {
        let mut settings = Self::default();
        settings.detection.mode = mode;
        settings
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.geometry.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}
