//! Mistake filtering: judge error contexts, log the decision, create cards.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::domain::{CoachFeedback, DecisionLog, FeedbackRequest, JudgeRequest, JudgeResponse, NewCard};
use crate::error::{ApiError, ApiResult};
use crate::filter::{analyze_submission, card_content, AnalyzeRequest, AnswerEntry, MistakeJudge};

use super::students::require_student;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub student_id: String,
    pub submission_id: i64,
    pub raw_answers: BTreeMap<String, AnswerEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub student_id: String,
    pub submission_id: i64,
    pub score: f64,
    pub decisions: Vec<JudgeResponse>,
}

/// Judge one mistake; an approved mistake becomes a card due tomorrow.
///
/// The decision log and its card are written together or not at all.
pub fn judge_mistake(
    conn: &Connection,
    judge: &dyn MistakeJudge,
    request: &JudgeRequest,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ApiResult<JudgeResponse> {
    require_student(conn, &request.student_id)?;

    let tx = conn.unchecked_transaction()?;
    let response = record_judgment(&tx, judge, request, today, now)?;
    tx.commit()?;
    Ok(response)
}

/// Log one judgment and create its card; the caller owns the transaction
fn record_judgment(
    conn: &Connection,
    judge: &dyn MistakeJudge,
    request: &JudgeRequest,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ApiResult<JudgeResponse> {
    let judgment = judge.judge(&request.error_context);
    let log = db::insert_decision_log(conn, &request.student_id, request.submission_id, &judgment, now)?;
    tracing::info!(
        "Decision {} for {} submission {}: {}",
        log.log_id,
        request.student_id,
        request.submission_id,
        judgment.decision.as_str()
    );

    let card_id = if judgment.decision.is_approved() {
        let (question, answer) = card_content(&request.error_context);
        let card = db::insert_card(
            conn,
            &NewCard {
                student_id: request.student_id.clone(),
                decision_log_id: Some(log.log_id),
                question,
                answer,
            },
            today,
            now,
        )?;
        tracing::info!("Created card {} from decision {}", card.card_id, log.log_id);
        Some(card.card_id)
    } else {
        None
    };

    Ok(JudgeResponse {
        log_id: log.log_id,
        decision: judgment.decision,
        reason: judgment.reason,
        card_id,
    })
}

/// Grade a submission and judge every mistake found in it.
///
/// All decisions and cards for the submission commit as one unit.
pub fn submit(
    conn: &Connection,
    judge: &dyn MistakeJudge,
    request: SubmissionRequest,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ApiResult<SubmissionResult> {
    require_student(conn, &request.student_id)?;

    let analysis = analyze_submission(&AnalyzeRequest {
        submission_id: request.submission_id,
        raw_answers: request.raw_answers,
    });

    let tx = conn.unchecked_transaction()?;
    let mut decisions = Vec::with_capacity(analysis.error_contexts.len());
    for error_context in analysis.error_contexts {
        let judged = record_judgment(
            &tx,
            judge,
            &JudgeRequest {
                student_id: request.student_id.clone(),
                submission_id: request.submission_id,
                error_context,
            },
            today,
            now,
        )?;
        decisions.push(judged);
    }
    tx.commit()?;

    Ok(SubmissionResult {
        student_id: request.student_id,
        submission_id: request.submission_id,
        score: analysis.score,
        decisions,
    })
}

/// Attach a coach's verdict to a logged decision
pub fn record_feedback(conn: &Connection, request: &FeedbackRequest) -> ApiResult<DecisionLog> {
    let feedback = CoachFeedback::from_str(&request.feedback).ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "feedback must be GOOD or BAD, got '{}'",
            request.feedback
        ))
    })?;

    let log = db::update_decision_feedback(
        conn,
        request.log_id,
        &request.coach_id,
        feedback,
        request.reason_code.as_deref(),
        request.memo.as_deref(),
    )?
    .ok_or(ApiError::NotFound("Decision log"))?;

    tracing::info!(
        "Coach {} marked decision {} as {}",
        request.coach_id,
        log.log_id,
        feedback.as_str()
    );
    Ok(log)
}
