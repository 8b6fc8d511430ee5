pub mod difficulty;
pub mod scoring;
pub mod strategies;

pub use difficulty::DifficultyWindow;
pub use scoring::score;
pub use strategies::{expand_aliases, is_canonical, strategies_to_exclude, ALL_STRATEGIES};
