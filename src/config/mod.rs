//! Configuration system
//!
//! Loads ~/.config/dbmessages/config.yaml with:
//! - The SQLite database and table holding the messages
//! - The cache duration in seconds
//! - Whether a missing code falls back to the code itself

mod message_source_config;
pub mod validation;

pub use message_source_config::{MessageSourceConfig, DEFAULT_TABLE};
pub use validation::{validate_config, validate_config_result, validate_table_name, ValidationError};
