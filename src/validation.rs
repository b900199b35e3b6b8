use anyhow::{anyhow, Result};
use std::path::Path;

/// Accepted workbook extensions, lower-cased
const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Validation utilities for boundary checks and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate an uploaded file name
    pub fn validate_file_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("File name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(anyhow!("File name too long (max 255 characters)"));
        }

        // Check for potentially dangerous characters
        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(anyhow!("File name contains invalid characters"));
        }

        Ok(())
    }

    /// Validate that a file name carries an accepted spreadsheet extension
    ///
    /// Files with other extensions must be rejected before their bytes reach
    /// the pipeline.
    pub fn validate_extension(name: &str) -> Result<()> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(anyhow!(
                "Unsupported extension '{}': expected one of {:?}",
                extension,
                ACCEPTED_EXTENSIONS
            ));
        }

        Ok(())
    }

    /// Validate workbook size against the configured limit
    pub fn validate_workbook_size(size_bytes: u64, max_mb: u64) -> Result<()> {
        if size_bytes == 0 {
            return Err(anyhow!("Workbook is empty"));
        }

        let max_bytes = max_mb.saturating_mul(1024 * 1024);
        if size_bytes > max_bytes {
            return Err(anyhow!(
                "Workbook too large: {} bytes (max {} MB)",
                size_bytes,
                max_mb
            ));
        }

        Ok(())
    }

    /// True when a longitude/latitude pair lies inside valid WGS84 ranges
    #[must_use]
    pub fn coordinates_in_range(longitude: f64, latitude: f64) -> bool {
        (-180.0..=180.0).contains(&longitude) && (-90.0..=90.0).contains(&latitude)
    }

    /// Sanitize text input by stripping control characters
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
