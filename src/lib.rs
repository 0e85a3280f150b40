//! dbmessages - code-based messages served from a database table
//!
//! The whole message table is loaded into memory and served from there until
//! the configured cache duration runs out. The next lookup after that reloads
//! the complete table. Stored messages may contain indexed placeholders
//! (`{0}`, `{1}`, ...) that are filled in from caller-supplied arguments.
//!
//! # Architecture
//!
//! - **store**: The cached snapshot and its refresh policy
//! - **resolver**: Code lookup and placeholder expansion
//! - **source**: Configured facade with the missing-code fallback
//! - **table**: SQLite table loader
//! - **loader** / **clock**: Seams for the data source and the time source
//! - **config**: YAML configuration
//! - **metrics**: Prometheus counters for reloads and failures

pub mod clock;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod resolver;
pub mod source;
pub mod store;
pub mod table;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LoadError, MessageError, Result};
pub use loader::{Loader, Messages};
pub use resolver::MessageResolver;
pub use source::MessageSource;
pub use store::{MessageStore, StoreStats};
pub use table::MessageTable;
