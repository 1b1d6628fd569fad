//! Cache Module
//!
//! Provides an in-memory key-value cache with lazy TTL expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL used by `TtlCache::default`
pub const DEFAULT_TTL_MINUTES: u64 = 60;
