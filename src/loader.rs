//! The loader seam between the cache and wherever messages live

use crate::error::LoadError;
use std::collections::HashMap;

/// A complete message table: code -> raw message
pub type Messages = HashMap<String, String>;

/// Supplies the full message table as of the call
///
/// Every call returns all entries. There is no partial or incremental load.
pub trait Loader: Send + Sync {
    fn load(&self) -> Result<Messages, LoadError>;
}

impl<F> Loader for F
where
    F: Fn() -> Result<Messages, LoadError> + Send + Sync,
{
    fn load(&self) -> Result<Messages, LoadError> {
        self()
    }
}
