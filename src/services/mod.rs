//! Application services.
//!
//! Orchestration between the pure scheduling/filter logic and storage.
//! Handlers lock the database and call into these; tests call them directly
//! with a `TestEnv` connection.

pub mod cards;
pub mod filter;
pub mod students;

pub use cards::{create_card, daily_deck, review_card};
pub use filter::{judge_mistake, record_feedback, submit, SubmissionRequest, SubmissionResult};
pub use students::{create_memo, create_student, require_student};
