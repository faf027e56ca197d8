//! Core traits defined in `strata-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
