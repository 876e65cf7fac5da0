//! System-wide caching defaults and environment access.

mod defaults;
pub use defaults::CacheDefaults;

// Environment variable access for config substitution.
pub mod env;
