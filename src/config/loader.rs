//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RedactorConfig;
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RedactorConfig
/// 4. Applies environment variable overrides (PHI_REDACTOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use phi_redactor::config::loader::load_config;
///
/// let config = load_config("phi-redactor.toml").expect("Failed to load config");
/// println!("Mode: {}", config.detection.mode);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RedactorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, or from defaults when the file is absent
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<RedactorConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    finish(RedactorConfig::default())
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<RedactorConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: RedactorConfig = toml::from_str(&contents)
        .map_err(|e| RedactorError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: RedactorConfig) -> Result<RedactorConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedactorError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RedactorError::Configuration(e.to_string()))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RedactorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| RedactorError::Configuration(format!("Invalid {name} value: {value}")))
}

/// Applies environment variable overrides using PHI_REDACTOR_* prefix
///
/// Environment variables follow the pattern: PHI_REDACTOR_<SECTION>_<KEY>
/// For example: PHI_REDACTOR_DETECTION_MODE, PHI_REDACTOR_PDF_DPI
fn apply_env_overrides(config: &mut RedactorConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PHI_REDACTOR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Detection, geometry and audit sections own their overrides
    let section_err = |e: anyhow::Error| RedactorError::Configuration(format!("{e:#}"));
    config.detection.apply_env_overrides().map_err(section_err)?;
    config.geometry.apply_env_overrides().map_err(section_err)?;
    config.audit.apply_env_overrides().map_err(section_err)?;

    // OCR overrides
    if let Ok(val) = std::env::var("PHI_REDACTOR_OCR_TESSERACT_PATH") {
        config.ocr.tesseract_path = val.into();
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_OCR_LANGUAGE") {
        config.ocr.language = val;
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_OCR_UPSCALE_MIN_DIMENSION") {
        config.ocr.upscale_min_dimension =
            parse_env("PHI_REDACTOR_OCR_UPSCALE_MIN_DIMENSION", &val)?;
    }

    // PDF overrides
    if let Ok(val) = std::env::var("PHI_REDACTOR_PDF_PDFTOPPM_PATH") {
        config.pdf.pdftoppm_path = val.into();
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_PDF_DPI") {
        config.pdf.dpi = parse_env("PHI_REDACTOR_PDF_DPI", &val)?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("PHI_REDACTOR_OUTPUT_WRITE_TEXT_OUTPUT") {
        config.output.write_text_output =
            parse_env("PHI_REDACTOR_OUTPUT_WRITE_TEXT_OUTPUT", &val)?;
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_OUTPUT_SUFFIX") {
        config.output.suffix = val;
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_OUTPUT_MAX_PARALLEL_PAGES") {
        config.output.max_parallel_pages =
            parse_env("PHI_REDACTOR_OUTPUT_MAX_PARALLEL_PAGES", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PHI_REDACTOR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PHI_REDACTOR_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::config::DetectionMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PHI_TEST_AUDIT_DIR", "/var/log/phi");
        let input = "log_path = \"${PHI_TEST_AUDIT_DIR}/audit.log\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "log_path = \"/var/log/phi/audit.log\"");
        std::env::remove_var("PHI_TEST_AUDIT_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PHI_TEST_MISSING_VAR");
        let input = "language = \"${PHI_TEST_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("PHI_TEST_COMMENTED");
        let input = "# language = \"${PHI_TEST_COMMENTED}\"\nmode = \"normal\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(RedactorError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent-phi-redactor.toml").unwrap();
        assert_eq!(config.pdf.dpi, 300);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[detection]
mode = "aggressive"

[pdf]
dpi = 200

[output]
write_text_output = false
max_parallel_pages = 2
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.detection.mode, DetectionMode::Aggressive);
        assert_eq!(config.pdf.dpi, 200);
        assert!(!config.output.write_text_output);
        assert_eq!(config.output.max_parallel_pages, 2);
    }

    #[test]
    fn test_parse_config_invalid_value() {
        let result = parse_config("[pdf]\ndpi = 10\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("pdf.dpi"));
    }
}
