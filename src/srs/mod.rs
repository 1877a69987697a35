pub mod deck;
pub mod sm2;

pub use deck::{build_daily_deck, ReviewDeck};
pub use sm2::{calculate_sm2, initial_schedule, next_schedule, Sm2Result, MIN_EASE_FACTOR};
