//! Domain models for death tax settlement

pub mod account;

// Re-exports
pub use account::{Account, DeathEvent};
