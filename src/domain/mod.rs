pub mod card;
pub mod decision;
pub mod review;
pub mod student;

pub use card::{NewCard, ReviewCard, ScheduleState};
pub use decision::{
  CoachFeedback, CoachMemo, CoachMemoCreate, Decision, DecisionLog, ErrorContext, FeedbackRequest,
  JudgeRequest, JudgeResponse, Judgment,
};
pub use review::{CardReviewRequest, Quality, SrsError};
pub use student::{Student, StudentCreate, StudentSettings, StudentSettingsUpdate};
