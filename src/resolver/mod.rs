//! Code-based message lookup on top of a [`MessageStore`]
//!
//! The `locale` parameter exists so callers coming from a locale-aware
//! message framework keep the same call shape. There is one table per store,
//! so the locale never changes the result.

pub mod format;

use crate::store::MessageStore;
use std::sync::Arc;

/// Resolves codes to raw or argument-expanded messages
#[derive(Debug, Clone)]
pub struct MessageResolver {
    store: Arc<MessageStore>,
}

impl MessageResolver {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Stored message for `code`, unformatted
    ///
    /// `None` means no such code. That is an ordinary outcome, not an error.
    pub fn resolve_raw(&self, code: &str, _locale: Option<&str>) -> Option<String> {
        tracing::trace!(code, "Resolving message");
        self.store.get(code)
    }

    /// Stored message for `code` with `{N}` placeholders filled from `args`
    ///
    /// With no arguments the raw message is returned untouched.
    pub fn resolve_formatted<S: AsRef<str>>(
        &self,
        code: &str,
        args: &[S],
        locale: Option<&str>,
    ) -> Option<String> {
        let raw = self.resolve_raw(code, locale)?;
        if args.is_empty() {
            return Some(raw);
        }
        Some(format::expand(&raw, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::LoadError;
    use crate::loader::Messages;

    fn resolver() -> MessageResolver {
        let loader = || -> Result<Messages, LoadError> {
            Ok(Messages::from([
                ("test1".to_string(), "message1".to_string()),
                ("test2".to_string(), "message {0} en nog {1}".to_string()),
            ]))
        };
        let store = MessageStore::new(loader, ManualClock::new(0), -1).unwrap();
        MessageResolver::new(Arc::new(store))
    }

    #[test]
    fn test_resolve_raw() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_raw("test1", None).as_deref(), Some("message1"));
        assert_eq!(resolver.resolve_raw("absent", None), None);
    }

    #[test]
    fn test_resolve_formatted() {
        let resolver = resolver();
        assert_eq!(
            resolver
                .resolve_formatted("test2", &["ivo", "woltring"], Some("en_GB"))
                .as_deref(),
            Some("message ivo en nog woltring")
        );
    }

    #[test]
    fn test_resolve_formatted_without_args_is_raw() {
        let resolver = resolver();
        let none: &[String] = &[];
        assert_eq!(
            resolver.resolve_formatted("test2", none, None).as_deref(),
            Some("message {0} en nog {1}")
        );
    }

    #[test]
    fn test_resolve_formatted_absent() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_formatted("nope", &["x"], None), None);
    }

    #[test]
    fn test_locale_is_ignored() {
        let resolver = resolver();
        let uk = resolver.resolve_formatted("test2", &["a", "b"], Some("en_GB"));
        let nl = resolver.resolve_formatted("test2", &["a", "b"], Some("nl_NL"));
        assert_eq!(uk, nl);
    }
}
