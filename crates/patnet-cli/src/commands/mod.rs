//! Command implementations.

pub mod clean;
pub mod config;
pub mod harvest;
pub mod stats;

pub use self::clean::execute_clean;
pub use self::config::execute_config;
pub use self::harvest::execute_harvest;
pub use self::stats::execute_stats;
