//! Message source facade
//!
//! Wires a [`MessageTable`] into a store and resolver, and applies the
//! fallback policy for codes that have no message.

use crate::clock::SystemClock;
use crate::config::{validate_config_result, MessageSourceConfig};
use crate::resolver::{format, MessageResolver};
use crate::store::MessageStore;
use crate::table::MessageTable;
use crate::{MessageError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Code-based messages backed by a database table
#[derive(Debug)]
pub struct MessageSource {
    resolver: MessageResolver,
    use_code_as_default_message: AtomicBool,
}

impl MessageSource {
    pub fn new(resolver: MessageResolver, use_code_as_default_message: bool) -> Self {
        Self {
            resolver,
            use_code_as_default_message: AtomicBool::new(use_code_as_default_message),
        }
    }

    /// Build a source from configuration, loading the table immediately
    ///
    /// # Errors
    /// Invalid configuration, or a failing first load.
    pub fn open(config: &MessageSourceConfig) -> Result<Self> {
        validate_config_result(config)?;

        let table = MessageTable::new(&config.database, &config.table_name)?;
        let store = MessageStore::with_cache_millis(table, SystemClock, config.cache_millis())?;

        tracing::debug!(
            table = %config.table_name,
            database = %config.database.display(),
            "Message source constructed"
        );

        Ok(Self::new(
            MessageResolver::new(Arc::new(store)),
            config.use_code_as_default_message,
        ))
    }

    pub fn resolver(&self) -> &MessageResolver {
        &self.resolver
    }

    pub fn store(&self) -> &Arc<MessageStore> {
        self.resolver.store()
    }

    pub fn use_code_as_default_message(&self) -> bool {
        self.use_code_as_default_message.load(Ordering::Relaxed)
    }

    pub fn set_use_code_as_default_message(&self, enabled: bool) {
        self.use_code_as_default_message
            .store(enabled, Ordering::Relaxed);
    }

    /// Resolve `code`, falling back to the code itself when enabled
    ///
    /// # Errors
    /// `MessageError::NoSuchMessage` when the code is absent and the code
    /// fallback is off.
    pub fn get_message<S: AsRef<str>>(
        &self,
        code: &str,
        args: &[S],
        locale: Option<&str>,
    ) -> Result<String> {
        if let Some(message) = self.resolver.resolve_formatted(code, args, locale) {
            return Ok(message);
        }
        if self.use_code_as_default_message() {
            return Ok(code.to_string());
        }
        Err(MessageError::NoSuchMessage {
            code: code.to_string(),
        })
    }

    /// Resolve `code`, or expand `default` with the same arguments
    pub fn get_message_or<S: AsRef<str>>(
        &self,
        code: &str,
        args: &[S],
        default: &str,
        locale: Option<&str>,
    ) -> String {
        self.resolver
            .resolve_formatted(code, args, locale)
            .unwrap_or_else(|| format::expand(default, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::LoadError;
    use crate::loader::Messages;

    fn source() -> MessageSource {
        let loader = || -> std::result::Result<Messages, LoadError> {
            Ok(Messages::from([(
                "welcome".to_string(),
                "Welcome {0}".to_string(),
            )]))
        };
        let store = MessageStore::new(loader, ManualClock::new(0), -1).unwrap();
        MessageSource::new(MessageResolver::new(Arc::new(store)), false)
    }

    #[test]
    fn test_get_message() {
        let source = source();
        assert_eq!(
            source.get_message("welcome", &["Ivo"], None).unwrap(),
            "Welcome Ivo"
        );
    }

    #[test]
    fn test_missing_code_is_error_by_default() {
        let source = source();
        let none: &[&str] = &[];
        let err = source.get_message("notexistingmessage", none, None).unwrap_err();
        assert!(matches!(err, MessageError::NoSuchMessage { ref code } if code == "notexistingmessage"));
    }

    #[test]
    fn test_use_code_as_default_message() {
        let source = source();
        source.set_use_code_as_default_message(true);
        let none: &[&str] = &[];
        assert_eq!(
            source.get_message("notexistingmessage", none, Some("en_GB")).unwrap(),
            "notexistingmessage"
        );
    }

    #[test]
    fn test_get_message_or_expands_default() {
        let source = source();
        assert_eq!(
            source.get_message_or("missing", &["42"], "Item {0} not found", None),
            "Item 42 not found"
        );
        assert_eq!(
            source.get_message_or("welcome", &["Ivo"], "unused", None),
            "Welcome Ivo"
        );
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let mut config = MessageSourceConfig::new();
        config.table_name = "no spaces allowed".to_string();
        assert!(matches!(
            MessageSource::open(&config),
            Err(MessageError::Config(_))
        ));
    }
}
