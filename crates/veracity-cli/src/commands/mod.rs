//! Command implementations.

pub mod analyze;
pub mod config;
pub mod quiz;
pub mod score;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::quiz::execute_quiz;
pub use self::score::execute_score;
