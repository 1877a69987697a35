//! Student registration and coach memos.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::db;
use crate::domain::{CoachMemo, CoachMemoCreate, Student, StudentCreate};
use crate::error::{ApiError, ApiResult};

/// Load a student or fail with `NotFound`
pub fn require_student(conn: &Connection, student_id: &str) -> ApiResult<Student> {
    db::get_student(conn, student_id)?.ok_or(ApiError::NotFound("Student"))
}

pub fn create_student(conn: &Connection, student: &StudentCreate, now: DateTime<Utc>) -> ApiResult<Student> {
    if student.student_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("student_id must not be empty".to_string()));
    }
    if db::get_student(conn, &student.student_id)?.is_some() {
        return Err(ApiError::AlreadyExists(format!(
            "Student with id {} already exists",
            student.student_id
        )));
    }

    let created = db::insert_student(conn, student, now)?;
    tracing::info!("Registered student {}", created.student_id);
    Ok(created)
}

pub fn create_memo(conn: &Connection, memo: &CoachMemoCreate, now: DateTime<Utc>) -> ApiResult<CoachMemo> {
    require_student(conn, &memo.student_id)?;
    if memo.content.trim().is_empty() {
        return Err(ApiError::InvalidInput("memo content must not be empty".to_string()));
    }

    let created = db::insert_memo(conn, memo, now)?;
    tracing::debug!(
        "Coach {} left memo {} for {}",
        created.coach_id,
        created.memo_id,
        created.student_id
    );
    Ok(created)
}
