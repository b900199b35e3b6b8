use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration structure
///
/// Operational knobs only. The pipeline's semantic constants (country
/// prefix, minimum subscriber digits, location epsilon) are fixed in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Parser settings
    pub parser: ParserConfig,
    /// Export settings
    pub export: ExportConfig,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Optional log file directory for rolling JSON logs
    pub file_path: Option<String>,
    /// Console format: "json" or "text"
    pub format: String,
}

/// Parsing limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum accepted workbook size in megabytes
    pub max_workbook_size_mb: u64,
}

/// Result export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default export format: "json" or "csv"
    pub default_format: String,
    /// Directory where result files are written
    pub output_directory: String,
    /// Pretty-print JSON output
    pub pretty_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            parser: ParserConfig {
                max_workbook_size_mb: 50,
            },
            export: ExportConfig {
                default_format: "json".to_string(),
                output_directory: "./output".to_string(),
                pretty_json: false,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        // Start with default values
        for (key, value) in AppConfig::default() {
            builder = builder.set_default(key, value)?;
        }

        let config = builder
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("CDR").separator("_"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        // Validate parser config
        if self.parser.max_workbook_size_mb == 0 {
            return Err(anyhow::anyhow!("max_workbook_size_mb must be greater than 0"));
        }

        // Validate export config
        let valid_formats = ["json", "csv"];
        if !valid_formats.contains(&self.export.default_format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid export format: {}. Must be one of: {:?}",
                self.export.default_format,
                valid_formats
            ));
        }

        if self.export.output_directory.trim().is_empty() {
            return Err(anyhow::anyhow!("output_directory cannot be empty"));
        }

        Ok(())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Get output directory from environment or config
    #[must_use]
    pub fn get_output_directory(&self) -> String {
        std::env::var("CDR_OUTPUT_DIR").unwrap_or_else(|_| self.export.output_directory.clone())
    }
}

impl IntoIterator for AppConfig {
    type Item = (String, config::Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, config::Value>;

    fn into_iter(self) -> Self::IntoIter {
        let mut map = std::collections::HashMap::new();

        // Flatten the configuration into key-value pairs
        map.insert(
            "logging.level".to_string(),
            config::Value::from(self.logging.level),
        );
        if let Some(file_path) = self.logging.file_path {
            map.insert(
                "logging.file_path".to_string(),
                config::Value::from(file_path),
            );
        }
        map.insert(
            "logging.format".to_string(),
            config::Value::from(self.logging.format),
        );

        map.insert(
            "parser.max_workbook_size_mb".to_string(),
            config::Value::from(self.parser.max_workbook_size_mb),
        );

        map.insert(
            "export.default_format".to_string(),
            config::Value::from(self.export.default_format),
        );
        map.insert(
            "export.output_directory".to_string(),
            config::Value::from(self.export.output_directory),
        );
        map.insert(
            "export.pretty_json".to_string(),
            config::Value::from(self.export.pretty_json),
        );

        map.into_iter()
    }
}
