//! Configuration module for monthwise
//!
//! Path resolution and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::MonthwisePaths;
pub use settings::Settings;
