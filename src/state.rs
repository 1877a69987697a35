//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::filter::{MistakeJudge, RuleBasedJudge};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,

    /// Decides which mistakes become review cards
    pub judge: Arc<dyn MistakeJudge>,
}

impl AppState {
    /// State with the default rule-based judge
    pub fn new(db: DbPool) -> Self {
        Self::with_judge(db, Arc::new(RuleBasedJudge))
    }

    pub fn with_judge(db: DbPool, judge: Arc<dyn MistakeJudge>) -> Self {
        Self { db, judge }
    }
}
