//! Cache Module
//!
//! Provides the cache backend contract and an in-memory implementation
//! with TTL expiration.

mod backend;
mod entry;
mod stats;
mod store;

// Re-export public types
pub use backend::{CacheBackend, MemoryCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
