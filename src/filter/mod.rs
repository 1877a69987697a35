pub mod analysis;
pub mod judge;

pub use analysis::{analyze_submission, AnalysisReport, AnalyzeRequest, AnswerEntry};
pub use judge::{card_content, MistakeJudge, RuleBasedJudge};
