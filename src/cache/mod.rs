//! In-memory cache for API read responses
//!
//! Entries live for the lifetime of the owning client and are only dropped by
//! TTL expiry on read or an explicit [`ResponseCache::clear`].

pub mod key;
pub mod storage;

use std::time::Duration;

/// Freshness window used when the config does not override it
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

pub use key::cache_key;
pub use storage::ResponseCache;
