pub mod core {
    pub mod config;
    pub mod engine;
    pub mod standings;
}

pub mod ui {
    pub mod app;
    pub mod setup;
}

// Re-export for convenience
pub use crate::core::config::{Difficulty, GameConfig, Player};
pub use crate::core::engine::{SecretSource, TurnEngine};
pub use crate::core::standings::Standings;
