//! Configuration validation
//!
//! Checks a message source configuration before anything is opened:
//! - The table name is a plain SQL identifier
//! - The database path is set

use super::message_source_config::MessageSourceConfig;
use crate::MessageError;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a message source configuration
pub fn validate_config(config: &MessageSourceConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(message) = check_table_name(&config.table_name) {
        errors.push(ValidationError::new("table_name", message));
    }

    if config.database.as_os_str().is_empty() {
        errors.push(ValidationError::new("database", "Database path must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert to a crate error
pub fn validate_config_result(config: &MessageSourceConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        MessageError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}

/// Table names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` passes
pub fn validate_table_name(name: &str) -> crate::Result<()> {
    check_table_name(name).map_err(MessageError::Config)
}

fn check_table_name(name: &str) -> std::result::Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("Table name must not be empty".to_string()),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(format!("Invalid table name '{}'", name));
        }
        Some(_) => {}
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(format!("Invalid table name '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = MessageSourceConfig::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_table_names() {
        assert!(validate_table_name("messages").is_ok());
        assert!(validate_table_name("_app_messages_2").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2messages").is_err());
        assert!(validate_table_name("messages; DROP TABLE users").is_err());
        assert!(validate_table_name("main.messages").is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MessageSourceConfig::new();
        config.table_name = "bad name".to_string();
        config.database = PathBuf::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "table_name");
        assert_eq!(errors[1].field, "database");
    }

    #[test]
    fn test_validate_config_result_message() {
        let mut config = MessageSourceConfig::new();
        config.table_name = String::new();

        let err = validate_config_result(&config).unwrap_err();
        assert!(err.to_string().contains("table_name: Table name must not be empty"));
    }
}
