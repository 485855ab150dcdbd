/// Database configuration and connection management
pub mod database;

/// Display settings loaded from console.toml
pub mod console;

/// Session token discovery from environment variables
pub mod session;
