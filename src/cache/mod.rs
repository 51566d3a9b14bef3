//! Generic set-associative cache engine (C1, §4.1).

pub mod config;
mod engine;
mod replacement;
pub mod stats;

pub use config::{AllocatePolicy, CacheConfig, ReplacementPolicy};
pub use engine::{AccessResult, Cache, InjectionValidation};
pub use stats::CacheCounters;
