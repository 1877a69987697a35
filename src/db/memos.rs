//! Coach memo storage

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result, Row};

use crate::domain::{CoachMemo, CoachMemoCreate};

fn row_to_memo(row: &Row) -> Result<CoachMemo> {
    Ok(CoachMemo {
        memo_id: row.get(0)?,
        student_id: row.get(1)?,
        coach_id: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn insert_memo(conn: &Connection, memo: &CoachMemoCreate, now: DateTime<Utc>) -> Result<CoachMemo> {
    conn.execute(
        "INSERT INTO coach_memos (student_id, coach_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![memo.student_id, memo.coach_id, memo.content, now],
    )?;

    Ok(CoachMemo {
        memo_id: conn.last_insert_rowid(),
        student_id: memo.student_id.clone(),
        coach_id: memo.coach_id.clone(),
        content: memo.content.clone(),
        created_at: now,
    })
}

/// A student's memos, newest first, optionally from one coach
pub fn list_memos(
    conn: &Connection,
    student_id: &str,
    coach_id: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<CoachMemo>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT memo_id, student_id, coach_id, content, created_at
    FROM coach_memos
    WHERE student_id = ?1 AND (?2 IS NULL OR coach_id = ?2)
    ORDER BY created_at DESC, memo_id DESC
    LIMIT ?3 OFFSET ?4
    "#,
    )?;

    let memos = stmt
        .query_map(params![student_id, coach_id, limit, skip], row_to_memo)?
        .collect::<Result<Vec<_>>>()?;
    Ok(memos)
}

/// Memos written in `[start, end]` (inclusive dates), newest first
pub fn get_memos_between(
    conn: &Connection,
    student_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CoachMemo>> {
    let end_exclusive = end.succ_opt().unwrap_or(end);
    let mut stmt = conn.prepare(
        r#"
    SELECT memo_id, student_id, coach_id, content, created_at
    FROM coach_memos
    WHERE student_id = ?1 AND created_at >= ?2 AND created_at < ?3
    ORDER BY created_at DESC, memo_id DESC
    "#,
    )?;

    let memos = stmt
        .query_map(params![student_id, start, end_exclusive], row_to_memo)?
        .collect::<Result<Vec<_>>>()?;
    Ok(memos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, day, TestEnv};

    fn memo(coach_id: &str, content: &str) -> CoachMemoCreate {
        CoachMemoCreate {
            student_id: "s1".to_string(),
            coach_id: coach_id.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_list_memos_newest_first_with_coach_filter() {
        let env = TestEnv::new().unwrap();
        insert_memo(&env.conn, &memo("c1", "first"), at(2024, 6, 1, 9)).unwrap();
        insert_memo(&env.conn, &memo("c2", "second"), at(2024, 6, 2, 9)).unwrap();
        insert_memo(&env.conn, &memo("c1", "third"), at(2024, 6, 3, 9)).unwrap();

        let all: Vec<_> = list_memos(&env.conn, "s1", None, 0, 100)
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(all, vec!["third", "second", "first"]);

        let c1: Vec<_> = list_memos(&env.conn, "s1", Some("c1"), 0, 100)
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(c1, vec!["third", "first"]);

        assert!(list_memos(&env.conn, "other", None, 0, 100).unwrap().is_empty());
    }

    #[test]
    fn test_memos_between() {
        let env = TestEnv::new().unwrap();
        insert_memo(&env.conn, &memo("c1", "early"), at(2024, 5, 31, 23)).unwrap();
        insert_memo(&env.conn, &memo("c1", "inside"), at(2024, 6, 4, 9)).unwrap();
        insert_memo(&env.conn, &memo("c1", "late"), at(2024, 6, 8, 0)).unwrap();

        let found = get_memos_between(&env.conn, "s1", day(2024, 6, 1), day(2024, 6, 7)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content, "inside");
    }
}
