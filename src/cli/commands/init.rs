//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "phi-redactor.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PHI Redactor configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Install tesseract and poppler-utils (pdftoppm)");
                println!("  2. Edit {} with your settings", self.output);
                println!("  3. Validate configuration: phi-redactor validate-config");
                println!("  4. Redact a document: phi-redactor redact scan.pdf");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# PHI Redactor Configuration File
# All sections are optional; values shown are the defaults.

[application]
log_level = "info"  # trace | debug | info | warn | error

[detection]
mode = "normal"  # normal | aggressive
# Replace the built-in rule catalog
# pattern_library = "./patterns/custom_rules.toml"

[geometry]
padding = 2
fill_color = [0, 0, 0]

[ocr]
tesseract_path = "tesseract"
language = "eng"
upscale_min_dimension = 1000

[pdf]
pdftoppm_path = "pdftoppm"
dpi = 300

[output]
write_text_output = true
suffix = "_redacted"
max_parallel_pages = 4

[audit]
enabled = false
log_path = "./audit/redaction.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
